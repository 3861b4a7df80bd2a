use std::sync::OnceLock;

use tera::{Context, Tera};
use tracing::info;

#[derive(Debug)]
pub struct TemplateManager {
    tera: &'static Tera,
}

impl TemplateManager {
    pub fn init() -> Self {
        info!(
            "{:<20} - Initializing the Template manager",
            "templ manager"
        );
        static TERA: OnceLock<Tera> = OnceLock::new();
        let tera = TERA.get_or_init(|| {
            Tera::new("templates/**/*").unwrap_or_else(|e| panic!("Parsing error(s): {e}"))
        });
        Self { tera }
    }

    /// Renders the plain-text welcome email advertising the `<topic>@{relay_domain}`
    /// convention.
    pub fn render_welcome_email(&self, relay_domain: &str) -> Result<String, tera::Error> {
        let mut ctx = Context::new();
        ctx.insert("relay_domain", relay_domain);

        self.tera().render("welcome_email.txt", &ctx)
    }

    pub fn tera(&self) -> &Tera {
        self.tera
    }
}
