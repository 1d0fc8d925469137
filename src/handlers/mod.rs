pub mod submission_form;
