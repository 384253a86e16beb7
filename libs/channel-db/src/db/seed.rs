//! Demo data loaded when the panel starts with seeding enabled.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::ActivityStatus;
use crate::models::agent::Agent;
use crate::models::audit_log::{AuditLog, AuditOutcome};
use crate::models::branch::{Branch, ReferenceType};
use crate::models::discount::{ApplicableFor, Discount, DiscountType, LegacyDiscount, NewDiscount};
use crate::store::Record;
use crate::utils::{DayBound, parse_instant};

fn at(raw: &str) -> Result<DateTime<Utc>> {
    parse_instant(raw, DayBound::Start)
}

fn discount(id: &str, created: &str, input: NewDiscount) -> Result<Discount> {
    let mut discount = Discount::from_new(input, at(created)?);
    discount.assign_id(id.to_string());
    discount.validate()?;
    Ok(discount)
}

fn legacy(code: &str, description: &str, percentage: f64, from: &str, to: &str, status: &str) -> LegacyDiscount {
    LegacyDiscount {
        code: code.to_string(),
        description: description.to_string(),
        discount_percentage: percentage,
        valid_from: from.to_string(),
        valid_to: to.to_string(),
        status: Some(status.to_string()),
    }
}

pub fn discounts() -> Result<Vec<Discount>> {
    Ok(vec![
        discount(
            "d1",
            "2025-05-15T10:00:00Z",
            legacy(
                "SUMMER2025",
                "Summer Special Discount",
                15.0,
                "2025-06-01T00:00:00Z",
                "2025-08-31T23:59:59Z",
                "Active",
            )
            .try_into()?,
        )?,
        discount(
            "d2",
            "2025-11-01T10:00:00Z",
            legacy(
                "NEWYEAR25",
                "New Year Promotion",
                25.0,
                "2025-12-25T00:00:00Z",
                "2026-01-05T23:59:59Z",
                "Inactive",
            )
            .try_into()?,
        )?,
        discount(
            "d3",
            "2024-12-01T09:00:00Z",
            NewDiscount {
                code: "EXPIRED2024".to_string(),
                description: "Year end clearance".to_string(),
                discount_type: DiscountType::Percentage,
                percentage: 10.0,
                fixed_amount: None,
                expiry_date: parse_instant("2025-01-15", DayBound::End)?,
                member_only: false,
                usage_limit: Some(500),
                applicable_for: ApplicableFor::All,
                enabled: Some(true),
            },
        )?,
        discount(
            "d4",
            "2025-09-01T08:00:00Z",
            NewDiscount {
                code: "DOCTORS500".to_string(),
                description: "Flat LKR 500 off specialist consultations".to_string(),
                discount_type: DiscountType::FixedAmount,
                percentage: 0.0,
                fixed_amount: Some(500.0),
                expiry_date: parse_instant("2026-12-31", DayBound::End)?,
                member_only: false,
                usage_limit: Some(200),
                applicable_for: ApplicableFor::Doctors,
                enabled: Some(true),
            },
        )?,
        discount(
            "d5",
            "2026-01-10T08:00:00Z",
            NewDiscount {
                code: "MEMBERS10".to_string(),
                description: "Members only hospital discount".to_string(),
                discount_type: DiscountType::Percentage,
                percentage: 10.0,
                fixed_amount: None,
                expiry_date: parse_instant("2027-06-30", DayBound::End)?,
                member_only: true,
                usage_limit: None,
                applicable_for: ApplicableFor::Hospitals,
                enabled: Some(true),
            },
        )?,
    ])
}

#[allow(clippy::too_many_arguments)]
fn log(
    id: &str,
    action: &str,
    (user, user_id, user_role): (&str, &str, &str),
    timestamp: &str,
    details: &str,
    module: &str,
    ip_address: &str,
    status: AuditOutcome,
) -> Result<AuditLog> {
    Ok(AuditLog {
        id: id.to_string(),
        action: action.to_string(),
        user: user.to_string(),
        user_id: user_id.to_string(),
        user_role: user_role.to_string(),
        timestamp: at(timestamp)?,
        details: details.to_string(),
        module: module.to_string(),
        ip_address: ip_address.to_string(),
        status,
    })
}

pub fn audit_logs() -> Result<Vec<AuditLog>> {
    const ADMIN: (&str, &str, &str) = ("John Admin", "U001", "Admin");
    const MANAGER: (&str, &str, &str) = ("Sarah Manager", "U002", "Manager");
    const EDITOR: (&str, &str, &str) = ("Mike Editor", "U003", "Editor");
    const UNKNOWN: (&str, &str, &str) = ("Unknown", "N/A", "N/A");

    use AuditOutcome::{Failed, Success};

    Ok(vec![
        log("l1", "User Login", ADMIN, "2025-10-26T08:30:15",
            "User logged in successfully from Chrome browser",
            "Authentication", "192.168.1.100", Success)?,
        log("l2", "Hospital Created", MANAGER, "2025-10-26T09:15:22",
            "Created new hospital: City General Hospital",
            "Hospitals", "192.168.1.105", Success)?,
        log("l3", "Doctor Updated", EDITOR, "2025-10-26T10:22:45",
            "Updated doctor profile: Dr. Smith (Specialization changed)",
            "Doctors", "192.168.1.110", Success)?,
        log("l4", "Payment Refund", ADMIN, "2025-10-26T11:05:33",
            "Refunded payment ID: PAY-12345 - Amount: $150.00",
            "Payments", "192.168.1.100", Success)?,
        log("l5", "Failed Login Attempt", UNKNOWN, "2025-10-26T11:30:10",
            "Failed login attempt with username: admin123",
            "Authentication", "192.168.1.200", Failed)?,
        log("l6", "Discount Created", MANAGER, "2025-10-26T12:00:18",
            "Created discount code: SUMMER2025 - 20% off",
            "Discounts", "192.168.1.105", Success)?,
        log("l7", "Branch Deleted", ADMIN, "2025-10-26T13:15:42",
            "Deleted branch: Downtown Branch (BR-005)",
            "Branches", "192.168.1.100", Success)?,
        log("l8", "User Created", ADMIN, "2025-10-26T14:20:55",
            "Created new user: Emily Viewer with Viewer role",
            "Users", "192.168.1.100", Success)?,
        log("l9", "Fee Updated", EDITOR, "2025-10-26T15:10:30",
            "Updated channeling fee for Telco network: $25.00 -> $30.00",
            "Fees", "192.168.1.110", Success)?,
        log("l10", "Invoice Generated", MANAGER, "2025-10-26T16:05:12",
            "Generated invoice: INV-2025-1234 for transaction TXN-9876",
            "Invoices", "192.168.1.105", Success)?,
    ])
}

pub fn agents() -> Result<Vec<Agent>> {
    let southern = at("2024-02-01T10:00:00Z")?;
    let northern = at("2024-03-10T10:00:00Z")?;

    Ok(vec![
        Agent {
            id: "a1".to_string(),
            agent_name: "Southern Medical Services".to_string(),
            agent_code: "AGT-SOUTH-001".to_string(),
            company_name: Some("Southern Medical Services".to_string()),
            address: Some("Galle Fort, Main St".to_string()),
            city: Some("Galle".to_string()),
            district: Some("Galle".to_string()),
            contact_number: Some("+94912234567".to_string()),
            email: Some("contact@southern-med.lk".to_string()),
            status: ActivityStatus::Active,
            created_at: southern,
            updated_at: southern,
        },
        Agent {
            id: "a2".to_string(),
            agent_name: "Northern Health Partners".to_string(),
            agent_code: "AGT-NORTH-001".to_string(),
            company_name: Some("Northern Health Partners".to_string()),
            address: None,
            city: Some("Jaffna".to_string()),
            district: None,
            contact_number: Some("+94124567890".to_string()),
            email: Some("info@northernhealth.lk".to_string()),
            status: ActivityStatus::Inactive,
            created_at: northern,
            updated_at: northern,
        },
    ])
}

struct BranchSeed {
    id: &'static str,
    name: &'static str,
    code: &'static str,
    reference: (ReferenceType, &'static str, &'static str),
    address: &'static str,
    city: &'static str,
    contact: &'static str,
    email: &'static str,
    created: &'static str,
}

impl BranchSeed {
    fn build(self) -> Result<Branch> {
        let created = at(self.created)?;
        let (reference_type, reference_id, reference_name) = self.reference;
        Ok(Branch {
            id: self.id.to_string(),
            branch_name: self.name.to_string(),
            branch_code: self.code.to_string(),
            reference_type,
            reference_id: reference_id.to_string(),
            reference_name: reference_name.to_string(),
            address: self.address.to_string(),
            city: self.city.to_string(),
            district: self.city.to_string(),
            contact_number: self.contact.to_string(),
            email: self.email.to_string(),
            status: ActivityStatus::Active,
            created_at: created,
            updated_at: created,
        })
    }
}

pub fn branches() -> Result<Vec<Branch>> {
    [
        BranchSeed {
            id: "b1",
            name: "Colombo Main Branch",
            code: "CMB001",
            reference: (ReferenceType::Hospital, "H001", "Colombo General Hospital"),
            address: "Regent Street, Colombo 08",
            city: "Colombo",
            contact: "+94112691111",
            email: "colombo@echannelling.com",
            created: "2024-01-15T10:00:00Z",
        },
        BranchSeed {
            id: "b2",
            name: "Kandy Branch",
            code: "KDY001",
            reference: (ReferenceType::Hospital, "H002", "Kandy Teaching Hospital"),
            address: "William Gopallawa Mawatha, Kandy",
            city: "Kandy",
            contact: "+94812234567",
            email: "kandy@echannelling.com",
            created: "2024-01-20T10:00:00Z",
        },
        BranchSeed {
            id: "b3",
            name: "Galle Agent Office",
            code: "GAL001",
            reference: (ReferenceType::Agent, "A001", "Southern Medical Services"),
            address: "Main Street, Galle Fort",
            city: "Galle",
            contact: "+94912234567",
            email: "galle@echannelling.com",
            created: "2024-02-01T10:00:00Z",
        },
    ]
    .into_iter()
    .map(BranchSeed::build)
    .collect()
}
