// Generation pipeline: PDF upload → model call → extraction → parse.
// All model calls go through llm_client — no direct Gemini calls here.

pub mod handlers;
