// Generic string error, for when more structure isn't warranted.
pub type SError = String;
