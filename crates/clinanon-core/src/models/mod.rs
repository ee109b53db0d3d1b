pub mod entity;
pub mod entity_type;
pub mod name_variant;
pub mod validation;
