//! HTML bodies for outbound email. User-supplied text is escaped; newsletter
//! content is authored by the admin as HTML and passed through as-is.

use crate::models::LeadPayload;
use crate::utils::escape_html;

pub fn otp_subject(brand: &str) -> String {
    format!("OTP Verification - {brand}")
}

pub fn otp_email(brand: &str, name: Option<&str>, code: &str, valid_minutes: u64) -> String {
    let greeting = escape_html(name.unwrap_or("Customer"));
    let brand = escape_html(brand);
    format!(
        r#"<h2>Hello {greeting},</h2>
<p>Your OTP for verification is:</p>
<h1 style="letter-spacing:4px">{code}</h1>
<p>This OTP is valid for {valid_minutes} minutes.</p>
<p>– Team {brand}</p>"#
    )
}

pub const ADMIN_LEAD_SUBJECT: &str = "New Verified Lead";

pub fn admin_lead_email(lead: &LeadPayload, stored_name: &str) -> String {
    let field = |value: Option<&str>, fallback: &str| escape_html(value.unwrap_or(fallback));
    format!(
        r#"<h3>New Verified Lead</h3>
<p><strong>Name:</strong> {}</p>
<p><strong>Phone:</strong> {}</p>
<p><strong>Email:</strong> {}</p>
<p><strong>Purpose:</strong> {}</p>
<p><strong>Requirements:</strong> {}</p>
<p><strong>Budget:</strong> {}</p>
<p><strong>Message:</strong> {}</p>"#,
        escape_html(stored_name),
        escape_html(&lead.phone),
        field(lead.email.as_deref(), "N/A"),
        escape_html(&lead.purpose),
        escape_html(&lead.requirements),
        field(lead.budget.as_deref(), "N/A"),
        field(lead.message.as_deref(), "-"),
    )
}

pub fn unsubscribe_url(backend_url: &str, token: &str) -> String {
    format!(
        "{}/api/subscribers/unsubscribe/{token}",
        backend_url.trim_end_matches('/')
    )
}

pub fn newsletter_email(content: &str, unsubscribe_url: &str) -> String {
    format!(
        r#"{content}
<hr />
<p style="font-size:12px;color:#666">
  Don’t want these emails?
  <a href="{}" target="_blank">Unsubscribe</a>
</p>"#,
        escape_html(unsubscribe_url)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> LeadPayload {
        LeadPayload {
            name: Some("A".into()),
            email: None,
            phone: "9990001111".into(),
            purpose: "Buy".into(),
            requirements: "2BHK <near> metro".into(),
            budget: None,
            message: None,
        }
    }

    #[test]
    fn test_otp_email_contains_code_and_fallback_name() {
        let html = otp_email("Oaklyn Real Estates", None, "482913", 5);
        assert!(html.contains("Hello Customer,"));
        assert!(html.contains(">482913<"));
        assert!(html.contains("valid for 5 minutes"));
        assert_eq!(otp_subject("Oaklyn"), "OTP Verification - Oaklyn");
    }

    #[test]
    fn test_admin_lead_email_escapes_and_fills_blanks() {
        let html = admin_lead_email(&payload(), "A");
        assert!(html.contains("<strong>Requirements:</strong> 2BHK &lt;near&gt; metro"));
        assert!(html.contains("<strong>Email:</strong> N/A"));
        assert!(html.contains("<strong>Budget:</strong> N/A"));
        assert!(html.contains("<strong>Message:</strong> -"));
    }

    #[test]
    fn test_unsubscribe_footer() {
        let url = unsubscribe_url("https://api.oaklyn.test/", "abc123");
        assert_eq!(url, "https://api.oaklyn.test/api/subscribers/unsubscribe/abc123");

        let html = newsletter_email("<p>News</p>", &url);
        assert!(html.starts_with("<p>News</p>"));
        assert!(html.contains(r#"href="https://api.oaklyn.test/api/subscribers/unsubscribe/abc123""#));
    }
}
