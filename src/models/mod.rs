pub mod mod_record;
pub mod pob;
pub mod price;
