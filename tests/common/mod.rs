pub mod template_resolver;
