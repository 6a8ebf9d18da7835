pub mod admin;
pub mod catalog;
pub mod dashboard;
pub mod form_modal;
pub mod listing;
pub mod toast;
