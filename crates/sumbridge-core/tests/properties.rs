//! Property-based tests for the session-bridging engine
//!
//! - token extraction: present ⇒ value, absent ⇒ None, many ⇒ first
//! - classification depends only on the landing URL
//! - report reshaping: N entries in ⇒ N records out, same order

use proptest::prelude::*;
use sumbridge_core::{
    classify, extract_csrf_token, parse_report, Classification, PortalEndpoints,
};

const BASE: &str = "https://portal.test";

fn token() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_-]{0,40}"
}

// =============================================================================
// Token extraction
// =============================================================================

proptest! {
    #[test]
    fn prop_extracts_token_when_present(
        token in token(),
        before in "[a-z ]{0,30}",
        after in "[a-z ]{0,30}",
    ) {
        let html = format!(
            "<html><body><p>{}</p><form><input type=\"text\" name=\"login\">\
             <input type=\"hidden\" name=\"_csrf\" value=\"{}\"></form><p>{}</p></body></html>",
            before, token, after
        );
        prop_assert_eq!(extract_csrf_token(&html), Some(token));
    }

    #[test]
    fn prop_first_token_wins(tokens in prop::collection::vec(token(), 2..6)) {
        let inputs: String = tokens
            .iter()
            .map(|t| format!("<input type=\"hidden\" name=\"_csrf\" value=\"{}\">", t))
            .collect();
        let html = format!("<html><body><form>{}</form></body></html>", inputs);

        prop_assert_eq!(extract_csrf_token(&html), Some(tokens[0].clone()));
    }

    #[test]
    fn prop_no_csrf_input_means_none(
        names in prop::collection::vec("[a-z]{1,10}", 0..5),
        value in token(),
    ) {
        let inputs: String = names
            .iter()
            .map(|n| format!("<input type=\"hidden\" name=\"{}\" value=\"{}\">", n, value))
            .collect();
        let html = format!("<html><body><form>{}</form></body></html>", inputs);

        prop_assert_eq!(extract_csrf_token(&html), None);
    }

    #[test]
    fn prop_arbitrary_input_never_panics(html in ".{0,200}") {
        let _ = extract_csrf_token(&html);
    }
}

// =============================================================================
// Classification
// =============================================================================

proptest! {
    #[test]
    fn prop_other_landing_urls_are_authenticated(path in "/[a-zA-Z0-9/]{1,30}") {
        let endpoints = PortalEndpoints::from_base(BASE);
        let url = format!("{}{}", BASE, path);
        prop_assume!(url != endpoints.login_url && url != endpoints.active_session_url);

        prop_assert_eq!(classify(&url, &endpoints), Classification::Authenticated);
    }

    #[test]
    fn prop_classification_tracks_configured_constants(host in "[a-z]{3,12}") {
        let base = format!("https://{}.example", host);
        let endpoints = PortalEndpoints::from_base(&base);

        prop_assert_eq!(
            classify(&endpoints.login_url, &endpoints),
            Classification::InvalidCredentials
        );
        prop_assert_eq!(
            classify(&endpoints.active_session_url, &endpoints),
            Classification::ActiveSession
        );
    }
}

// =============================================================================
// Report reshaping
// =============================================================================

#[derive(Debug, Clone)]
struct RawCourse {
    school: String,
    plan: String,
    cycle: String,
    subject: String,
    section: String,
    first: String,
    paternal: String,
    maternal: String,
}

fn raw_course() -> impl Strategy<Value = RawCourse> {
    (
        (".{0,20}", "[0-9]{0,4}", "[0-9]{0,2}", ".{0,20}"),
        ("[0-9]{0,2}", ".{0,12}", ".{0,12}", ".{0,12}"),
    )
        .prop_map(|((school, plan, cycle, subject), (section, first, paternal, maternal))| {
            RawCourse {
                school,
                plan,
                cycle,
                subject,
                section,
                first,
                paternal,
                maternal,
            }
        })
}

proptest! {
    #[test]
    fn prop_report_preserves_count_and_order(courses in prop::collection::vec(raw_course(), 0..12)) {
        let entries: Vec<serde_json::Value> = courses
            .iter()
            .map(|c| serde_json::json!({
                "desEscuela": c.school,
                "codPlan": c.plan,
                "cicloEstudio": c.cycle,
                "desAsignatura": c.subject,
                "codSeccion": c.section,
                "nomDocente": c.first,
                "apePatDocente": c.paternal,
                "apeMatDocente": c.maternal,
                "vendorExtra": true,
            }))
            .collect();
        let body = serde_json::json!({ "data": { "matricula": entries } }).to_string();

        let records = parse_report(&body).expect("well-formed report must parse");

        prop_assert_eq!(records.len(), courses.len());
        for (record, raw) in records.iter().zip(courses.iter()) {
            prop_assert_eq!(&record.school, &raw.school);
            prop_assert_eq!(&record.subject, &raw.subject);
            prop_assert_eq!(&record.section, &raw.section);
            prop_assert_eq!(
                record.instructor.clone(),
                format!("{} {} {}", raw.first, raw.paternal, raw.maternal)
            );
        }
    }
}
