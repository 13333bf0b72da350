use veil_core_contact_impl::ContactServiceImpl;
use veil_email_impl::EmailServiceImpl;
use veil_shared_impl::time::TimeServiceImpl;
use veil_templates_impl::TemplateServiceImpl;

pub type RestServer = veil_api_rest::RestServer<Contact>;

pub type Time = TimeServiceImpl;
pub type Template = TemplateServiceImpl;
pub type Email = EmailServiceImpl;

pub type Contact = ContactServiceImpl<Time, Template, Email>;
