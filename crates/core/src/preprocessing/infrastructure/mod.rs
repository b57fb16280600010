pub mod cpu_preprocessor;
mod filters;
