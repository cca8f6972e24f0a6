pub mod confirm_sheet;
