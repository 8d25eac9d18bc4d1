//! Property-based tests for response decoding
//!
//! These tests use proptest to verify:
//! 1. Subpod normalization: one `<subpod>` or many, `subpods` is always a sequence
//!    of the true length
//! 2. `results` is exactly the primary-or-"Result" pods, in document order
//! 3. Boolean coercion accepts only the two literal tokens

use proptest::prelude::*;
use wolframalpha::{from_xml_str, parse_bool};

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('\'', "&apos;")
}

fn pod_xml(title: &str, primary: Option<bool>, texts: &[String]) -> String {
    let primary = primary.map_or(String::new(), |p| format!(" primary='{p}'"));
    let subpods: String = texts
        .iter()
        .map(|text| format!("<subpod title=''><plaintext>{}</plaintext></subpod>", escape(text)))
        .collect();
    format!(
        "<pod title='{}' error='false' numsubpods='{}'{primary}>{subpods}</pod>",
        escape(title),
        texts.len()
    )
}

fn result_xml(pods: &[String]) -> String {
    format!(
        "<queryresult success='true' error='false'>{}</queryresult>",
        pods.concat()
    )
}

fn title_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Result".to_string()),
        Just("result".to_string()),
        Just("Input".to_string()),
        "[A-Za-z ]{1,12}",
    ]
}

proptest! {
    #[test]
    fn subpods_match_true_count(texts in prop::collection::vec("[a-z0-9 =+]{1,16}", 1..6)) {
        let xml = result_xml(&[pod_xml("Result", None, &texts)]);
        let result = from_xml_str(&xml).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let pods = result.pods();
        prop_assert_eq!(pods.len(), 1);

        let pod = pods.first().ok_or_else(|| TestCaseError::fail("missing pod"))?;
        prop_assert_eq!(pod.subpods().len(), texts.len());
        let decoded = pod.texts().map_err(|e| TestCaseError::fail(e.to_string()))?;
        let expected: Vec<&str> = texts.iter().map(|t| t.trim()).collect();
        prop_assert_eq!(decoded, expected);
    }

    #[test]
    fn results_are_primary_or_result_titled(
        pods in prop::collection::vec((title_strategy(), prop::option::of(any::<bool>())), 0..8)
    ) {
        let xml_pods: Vec<String> = pods
            .iter()
            .map(|(title, primary)| pod_xml(title, *primary, &["x".to_string()]))
            .collect();
        let result = from_xml_str(&result_xml(&xml_pods))
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        let expected: Vec<String> = pods
            .iter()
            .filter(|(title, primary)| primary.unwrap_or(false) || title == "Result")
            .map(|(title, _)| title.clone())
            .collect();
        let actual = result
            .results()
            .map_err(|e| TestCaseError::fail(e.to_string()))?
            .iter()
            .map(|pod| pod.title().map(str::to_string))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(actual, expected);
        prop_assert_eq!(result.info().len(), pods.len());
    }

    #[test]
    fn bool_coercion_rejects_other_tokens(raw in "\\PC{0,8}") {
        let parsed = parse_bool("primary", &raw);
        match raw.as_str() {
            "true" => prop_assert_eq!(parsed.ok(), Some(true)),
            "false" => prop_assert_eq!(parsed.ok(), Some(false)),
            _ => prop_assert!(parsed.is_err()),
        }
    }
}
