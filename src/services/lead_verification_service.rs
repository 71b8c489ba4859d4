use std::sync::Arc;

use crate::database::{LeadRepository, NewLead};
use crate::error::{AppError, AppResult};
use crate::external::{NotificationGateway, OutboundEmail};
use crate::models::*;
use crate::services::OtpStore;
use crate::utils::mail_templates;
use crate::utils::{normalize_email, normalize_phone, validate_email};

/// What happened to the out-of-band delivery of a freshly issued code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeDelivery {
    Emailed,
    /// No email address was supplied.
    NotRequested,
    /// The code is issued and valid, but the email did not go out.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeIssued {
    pub phone: String,
    pub expires_in: i64,
    pub delivery: CodeDelivery,
}

#[derive(Debug, Clone)]
pub struct LeadConfirmed {
    pub lead: LeadResponse,
    pub admin_notified: bool,
}

/// Two-phase lead capture: issue a code bound to the submitted fields, then
/// persist the lead once the code is confirmed.
#[derive(Clone)]
pub struct LeadVerificationService {
    otp_store: OtpStore,
    leads: Arc<dyn LeadRepository>,
    notifier: Arc<dyn NotificationGateway>,
    brand_name: String,
    admin_email: String,
}

impl LeadVerificationService {
    pub fn new(
        otp_store: OtpStore,
        leads: Arc<dyn LeadRepository>,
        notifier: Arc<dyn NotificationGateway>,
        brand_name: String,
        admin_email: String,
    ) -> Self {
        Self {
            otp_store,
            leads,
            notifier,
            brand_name,
            admin_email,
        }
    }

    fn validate(request: SendOtpRequest) -> AppResult<LeadPayload> {
        // any non-empty phone string is accepted; only separators are stripped
        let phone = non_blank(request.phone)
            .map(|p| normalize_phone(&p))
            .filter(|p| !p.is_empty());
        let purpose = non_blank(request.purpose);
        let requirements = non_blank(request.requirements);

        let (Some(phone), Some(purpose), Some(requirements)) = (phone, purpose, requirements)
        else {
            return Err(AppError::ValidationError(
                "Phone, purpose and requirements are required".to_string(),
            ));
        };

        let email = non_blank(request.email).map(|e| normalize_email(&e));
        if let Some(email) = &email {
            validate_email(email)?;
        }

        Ok(LeadPayload {
            name: non_blank(request.name),
            email,
            phone,
            purpose,
            requirements,
            budget: non_blank(request.budget),
            message: non_blank(request.message),
        })
    }

    pub async fn request_code(&self, request: SendOtpRequest) -> AppResult<CodeIssued> {
        let payload = Self::validate(request)?;
        let phone = payload.phone.clone();
        let recipient = payload.email.clone();
        let name = payload.name.clone();

        let code = self.otp_store.issue(&phone, payload).await;
        let ttl = self.otp_store.ttl();

        let delivery = match recipient {
            None => CodeDelivery::NotRequested,
            Some(to) => {
                let html = mail_templates::otp_email(
                    &self.brand_name,
                    name.as_deref(),
                    &code,
                    ttl.num_minutes().max(1) as u64,
                );
                let email = OutboundEmail::new(to, mail_templates::otp_subject(&self.brand_name), html);
                match self.notifier.send(email).await {
                    Ok(()) => CodeDelivery::Emailed,
                    Err(e) => {
                        log::warn!("Verification code for {phone} issued but email failed: {e}");
                        CodeDelivery::Failed(e.to_string())
                    }
                }
            }
        };

        Ok(CodeIssued {
            phone,
            expires_in: ttl.num_seconds(),
            delivery,
        })
    }

    pub async fn confirm_code(&self, phone: &str, code: &str) -> AppResult<LeadConfirmed> {
        let phone = normalize_phone(phone);
        let pending = self.otp_store.consume(&phone, code.trim()).await?;

        let new_lead = NewLead::verified(pending.payload.clone());
        let stored_name = new_lead.name().to_string();

        let lead = match self.leads.create(new_lead).await {
            Ok(lead) => lead,
            Err(e) => {
                log::error!("Persisting verified lead for {phone} failed: {e}");
                if self.otp_store.reinstate(&phone, pending).await {
                    log::info!("Pending verification for {phone} reinstated for retry");
                }
                return Err(e);
            }
        };
        log::info!("Verified lead {} stored for {}", lead.id, lead.phone);

        let admin_notified = self.notify_admin(&pending.payload, &stored_name).await;

        Ok(LeadConfirmed {
            lead: LeadResponse::from(lead),
            admin_notified,
        })
    }

    async fn notify_admin(&self, payload: &LeadPayload, stored_name: &str) -> bool {
        if self.admin_email.is_empty() {
            log::warn!("No admin email configured; skipping verified-lead alert");
            return false;
        }

        let email = OutboundEmail::new(
            self.admin_email.clone(),
            mail_templates::ADMIN_LEAD_SUBJECT,
            mail_templates::admin_lead_email(payload, stored_name),
        );
        match self.notifier.send(email).await {
            Ok(()) => true,
            Err(e) => {
                log::error!("Verified-lead alert for {} failed: {e}", payload.phone);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::lead_entity as leads;
    use crate::services::VerificationError;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingGateway {
        sent: Mutex<Vec<OutboundEmail>>,
        fail: bool,
    }

    impl RecordingGateway {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        fn sent(&self) -> Vec<OutboundEmail> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NotificationGateway for RecordingGateway {
        async fn send(&self, email: OutboundEmail) -> AppResult<()> {
            self.sent.lock().unwrap().push(email);
            if self.fail {
                Err(AppError::NotificationError("provider unavailable".into()))
            } else {
                Ok(())
            }
        }
    }

    #[derive(Default)]
    struct InMemoryLeads {
        rows: Mutex<Vec<leads::Model>>,
        fail: bool,
    }

    impl InMemoryLeads {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        fn rows(&self) -> Vec<leads::Model> {
            self.rows.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LeadRepository for InMemoryLeads {
        async fn create(&self, lead: NewLead) -> AppResult<leads::Model> {
            if self.fail {
                return Err(AppError::DatabaseError(sea_orm::DbErr::Custom(
                    "connection reset".into(),
                )));
            }
            let mut rows = self.rows.lock().unwrap();
            let now = Utc::now();
            let model = leads::Model {
                id: rows.len() as i64 + 1,
                name: lead.name().to_string(),
                phone: lead.payload.phone,
                email: lead.payload.email,
                purpose: lead.payload.purpose,
                requirements: lead.payload.requirements,
                budget: lead.payload.budget,
                message: lead.payload.message,
                marked: false,
                is_verified: lead.is_verified,
                created_at: now,
                updated_at: now,
            };
            rows.push(model.clone());
            Ok(model)
        }
    }

    struct Harness {
        store: OtpStore,
        leads: Arc<InMemoryLeads>,
        gateway: Arc<RecordingGateway>,
        service: LeadVerificationService,
    }

    fn harness_with(leads: InMemoryLeads, gateway: RecordingGateway) -> Harness {
        let store = OtpStore::new(Duration::from_secs(300));
        let leads = Arc::new(leads);
        let gateway = Arc::new(gateway);
        let service = LeadVerificationService::new(
            store.clone(),
            leads.clone(),
            gateway.clone(),
            "Oaklyn Real Estates".into(),
            "admin@oaklyn.test".into(),
        );
        Harness {
            store,
            leads,
            gateway,
            service,
        }
    }

    fn harness() -> Harness {
        harness_with(InMemoryLeads::default(), RecordingGateway::default())
    }

    fn request(email: Option<&str>) -> SendOtpRequest {
        SendOtpRequest {
            name: Some("A".into()),
            email: email.map(str::to_string),
            phone: Some("9990001111".into()),
            purpose: Some("Buy".into()),
            requirements: Some("2BHK".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_missing_required_fields_are_rejected() {
        let h = harness();
        for broken in [
            SendOtpRequest { phone: None, ..request(None) },
            SendOtpRequest { purpose: Some("  ".into()), ..request(None) },
            SendOtpRequest { requirements: None, ..request(None) },
        ] {
            let err = h.service.request_code(broken).await.unwrap_err();
            assert!(matches!(err, AppError::ValidationError(_)));
        }
        assert!(h.store.is_empty().await);
        assert!(h.gateway.sent().is_empty());
    }

    #[tokio::test]
    async fn test_free_form_phone_is_accepted() {
        let h = harness();
        for phone in ["12345", "ext-42", "+1234567890123456"] {
            let issued = h
                .service
                .request_code(SendOtpRequest {
                    phone: Some(phone.into()),
                    ..request(None)
                })
                .await
                .unwrap();
            assert!(h.store.pending_code(&issued.phone).await.is_some());
        }
        assert_eq!(h.store.len().await, 3);

        let err = h
            .service
            .request_code(SendOtpRequest {
                phone: Some(" - ( ) ".into()),
                ..request(None)
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_invalid_email_is_rejected_before_issuing() {
        let h = harness();
        let err = h
            .service
            .request_code(request(Some("not-an-email")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(h.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_request_without_email_issues_silently() {
        let h = harness();
        let issued = h.service.request_code(request(None)).await.unwrap();

        assert_eq!(issued.delivery, CodeDelivery::NotRequested);
        assert_eq!(issued.expires_in, 300);
        assert!(h.store.pending_code("9990001111").await.is_some());
        assert!(h.gateway.sent().is_empty());
    }

    #[tokio::test]
    async fn test_request_with_email_sends_the_code() {
        let h = harness();
        let issued = h
            .service
            .request_code(request(Some(" A@Example.com ")))
            .await
            .unwrap();
        assert_eq!(issued.delivery, CodeDelivery::Emailed);

        let code = h.store.pending_code("9990001111").await.unwrap();
        let sent = h.gateway.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "a@example.com");
        assert_eq!(sent[0].subject, "OTP Verification - Oaklyn Real Estates");
        assert!(sent[0].html.contains(&code));
    }

    #[tokio::test]
    async fn test_email_failure_keeps_code_valid() {
        let h = harness_with(InMemoryLeads::default(), RecordingGateway::failing());
        let issued = h
            .service
            .request_code(request(Some("a@example.com")))
            .await
            .unwrap();
        assert!(matches!(issued.delivery, CodeDelivery::Failed(_)));

        let code = h.store.pending_code("9990001111").await.unwrap();
        let confirmed = h.service.confirm_code("9990001111", &code).await.unwrap();
        assert!(confirmed.lead.is_verified);
        // admin alert failed too, but the lead is stored
        assert!(!confirmed.admin_notified);
        assert_eq!(h.leads.rows().len(), 1);
    }

    #[tokio::test]
    async fn test_end_to_end_verified_lead() {
        let h = harness();
        h.service.request_code(request(None)).await.unwrap();
        let code = h.store.pending_code("9990001111").await.unwrap();
        assert_eq!(code.len(), 6);

        let confirmed = h.service.confirm_code("9990001111", &code).await.unwrap();
        assert!(confirmed.admin_notified);
        assert_eq!(confirmed.lead.name, "A");
        assert_eq!(confirmed.lead.purpose, "Buy");
        assert_eq!(confirmed.lead.requirements, "2BHK");
        assert!(confirmed.lead.is_verified);

        let rows = h.leads.rows();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_verified);

        let sent = h.gateway.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "admin@oaklyn.test");
        assert_eq!(sent[0].subject, "New Verified Lead");
        assert!(sent[0].html.contains("9990001111"));

        let err = h.service.confirm_code("9990001111", &code).await.unwrap_err();
        assert!(matches!(err, AppError::Verification(VerificationError::NotFound)));
    }

    #[tokio::test]
    async fn test_formatted_phone_matches_pending_code() {
        let h = harness();
        h.service
            .request_code(SendOtpRequest {
                phone: Some("999-000 1111".into()),
                ..request(None)
            })
            .await
            .unwrap();
        let code = h.store.pending_code("9990001111").await.unwrap();
        assert!(h.service.confirm_code(" 999 000 1111", &code).await.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_phone_is_not_found() {
        let h = harness();
        let err = h
            .service
            .confirm_code("unknown-phone", "123456")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Verification(VerificationError::NotFound)));
        assert!(h.leads.rows().is_empty());
    }

    #[tokio::test]
    async fn test_wrong_code_is_retryable() {
        let h = harness();
        h.service.request_code(request(None)).await.unwrap();
        let code = h.store.pending_code("9990001111").await.unwrap();
        let wrong = if code == "123456" { "654321" } else { "123456" };

        let err = h.service.confirm_code("9990001111", wrong).await.unwrap_err();
        assert!(matches!(err, AppError::Verification(VerificationError::Mismatch)));
        assert!(h.leads.rows().is_empty());
        assert!(h.gateway.sent().is_empty());

        assert!(h.service.confirm_code("9990001111", &code).await.is_ok());
    }

    #[tokio::test]
    async fn test_persistence_failure_is_fatal_and_code_survives() {
        let h = harness_with(InMemoryLeads::failing(), RecordingGateway::default());
        h.service.request_code(request(None)).await.unwrap();
        let code = h.store.pending_code("9990001111").await.unwrap();

        let err = h.service.confirm_code("9990001111", &code).await.unwrap_err();
        assert!(matches!(err, AppError::DatabaseError(_)));
        assert!(h.gateway.sent().is_empty());
        assert_eq!(h.store.pending_code("9990001111").await, Some(code));
    }

    #[tokio::test]
    async fn test_blank_name_is_stored_as_customer() {
        let h = harness();
        h.service
            .request_code(SendOtpRequest {
                name: None,
                ..request(None)
            })
            .await
            .unwrap();
        let code = h.store.pending_code("9990001111").await.unwrap();
        let confirmed = h.service.confirm_code("9990001111", &code).await.unwrap();
        assert_eq!(confirmed.lead.name, "Customer");
    }
}
