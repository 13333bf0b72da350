use serde::Serialize;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TemplateService: Send + Sync + 'static {
    /// Render the given template.
    fn render<T: Template + 'static>(&self, template: &T) -> anyhow::Result<String>;
}

#[cfg(feature = "mock")]
impl MockTemplateService {
    pub fn with_render<T: Template + Send + PartialEq + std::fmt::Debug + 'static>(
        mut self,
        template: T,
        result: String,
    ) -> Self {
        self.expect_render()
            .once()
            .with(mockall::predicate::eq(template))
            .return_once(|_| Ok(result));
        self
    }
}

/// A template registered under its file name. Names ending in `.html` are
/// rendered with HTML escaping, everything else verbatim.
pub trait Template: Serialize {
    const NAME: &'static str;
    const TEMPLATE: &'static str;
}

macro_rules! templates {
    ($( $ident:ident ( $path:literal ), )* ) => {
        $(
            impl Template for $ident {
                const NAME: &'static str = $path;
                const TEMPLATE: &'static str = include_str!(concat!("../templates/", $path));
            }
        )*

        pub const TEMPLATES: &[(&str, &str)] = &[
            $( ($ident::NAME, $ident::TEMPLATE) ),*
        ];
    };
}

templates! {
    ContactSubmissionHtmlTemplate("contact_submission.html"),
    ContactSubmissionTextTemplate("contact_submission.txt"),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSubmissionHtmlTemplate {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub submitted_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSubmissionTextTemplate {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub submitted_at: String,
}
