mod claude;
mod copilot;
pub mod exec;
mod gemini;
mod ollama;
mod opencode;
pub mod parsers;
pub mod prompts;
mod provider;
mod registry;

pub use claude::Claude;
pub use copilot::Copilot;
pub use gemini::Gemini;
pub use ollama::Ollama;
pub use opencode::Opencode;
pub use prompts::build_prompt;
pub use provider::{clean_output, Provider, Request, Task, DEFAULT_MODEL};
pub use registry::Registry;
