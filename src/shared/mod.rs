pub mod constants;
pub mod forms;
pub mod price;
pub mod slug;
#[cfg(test)]
pub mod test_helpers;
pub mod types;
pub mod validation;
pub mod video;
pub mod views;
