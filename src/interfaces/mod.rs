pub mod subconverter;

pub use subconverter::{
    convert, convert_with_options, count_input_lines, Conversion, ConvertError, OUTPUT_FILE_NAME,
    OUTPUT_MIME_TYPE,
};
