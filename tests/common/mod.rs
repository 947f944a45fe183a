use openbroker::import::RawInput;

pub fn csv_input(name: &str, content: &str) -> RawInput {
    RawInput::new(name.to_string(), "text/csv".to_string(), content.to_string())
}
