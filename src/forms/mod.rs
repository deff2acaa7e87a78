pub mod fields;
pub mod lead_form;
