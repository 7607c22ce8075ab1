pub mod languages;
pub mod prompts;
pub mod response;
pub mod selection;
pub mod storage;
pub mod vocab;
