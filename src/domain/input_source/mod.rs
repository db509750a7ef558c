pub mod output_path;
pub mod path_error;
pub mod png_file_path;
