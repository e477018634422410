pub mod csv_backup;
pub mod discovery;
pub mod generative;
pub mod keyword_generator;
pub mod keyword_validator;
pub mod keywords;
pub mod notion;
pub mod pipeline;
pub mod script_generator;
pub mod scoring;
pub mod transcript;
pub mod youtube;
