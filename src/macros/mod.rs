pub mod database_error_handeler;
