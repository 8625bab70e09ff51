pub mod prompts;

pub use prompts::prompt_confirmation;
