pub mod dropzone_field;
