pub mod url_convert;
