//! Card payloads sent during the EKYC flow.
//!
//! The JSON bodies follow the Bot Framework hero-card and Adaptive
//! Card schemas; the field set is fixed by the flow, so the cards are
//! built inline rather than from templates.

use serde_json::json;

use crate::activity::Attachment;

pub const HERO_CARD_CONTENT_TYPE: &str = "application/vnd.microsoft.card.hero";
pub const ADAPTIVE_CARD_CONTENT_TYPE: &str = "application/vnd.microsoft.card.adaptive";

const WELCOME_IMAGE_URL: &str =
    "https://travelvisabookings.com/wp-content/uploads/2016/02/visa-application-form.jpg";

/// Welcome hero card: form image plus the two main options.
pub fn welcome_card(fill_form_label: &str, exit_label: &str) -> Attachment {
    Attachment {
        content_type: Some(HERO_CARD_CONTENT_TYPE.into()),
        content: Some(json!({
            "images": [
                { "url": WELCOME_IMAGE_URL, "alt": "FormImage" }
            ],
            "buttons": [
                { "type": "postBack", "title": fill_form_label, "value": fill_form_label },
                { "type": "postBack", "title": exit_label, "value": exit_label }
            ]
        })),
        ..Attachment::default()
    }
}

/// The personal-details adaptive card form.
pub fn details_form_card() -> Attachment {
    Attachment {
        content_type: Some(ADAPTIVE_CARD_CONTENT_TYPE.into()),
        content: Some(json!({
            "type": "AdaptiveCard",
            "version": "0.5",
            "body": [
                {
                    "type": "TextBlock",
                    "size": "medium",
                    "weight": "bolder",
                    "text": "Details",
                    "horizontalAlignment": "center"
                },
                {
                    "type": "Input.Text",
                    "placeholder": "Name",
                    "style": "text",
                    "maxLength": 0,
                    "id": "Name"
                },
                {
                    "type": "TextBlock",
                    "size": "medium",
                    "text": "Insured For",
                    "weight": "bolder"
                },
                {
                    "type": "Input.ChoiceSet",
                    "id": "InsuredFor",
                    "style": "compact",
                    "value": "Self",
                    "choices": [
                        { "title": "Self", "value": "Self" },
                        { "title": "Father", "value": "Father" },
                        { "title": "Mother", "value": "Mother" },
                        { "title": "Spouse", "value": "Spouse" },
                        { "title": "Other", "value": "Other" }
                    ]
                },
                {
                    "type": "Input.Text",
                    "placeholder": "Email",
                    "style": "email",
                    "maxLength": 0,
                    "id": "Email"
                },
                {
                    "type": "TextBlock",
                    "size": "medium",
                    "weight": "bolder",
                    "text": "Date of Birth"
                },
                {
                    "type": "Input.Date",
                    "placeholder": "Due Date",
                    "id": "Date",
                    "value": "Date"
                },
                {
                    "type": "TextBlock",
                    "size": "medium",
                    "weight": "bolder",
                    "text": "Region"
                },
                {
                    "type": "Input.ChoiceSet",
                    "id": "Region",
                    "style": "compact",
                    "value": "Bangalore",
                    "choices": [
                        { "title": "Bangalore", "value": "Bangalore" },
                        { "title": "Huzurnagar", "value": "Huzurnagar" },
                        { "title": "WestBengal", "value": "WestBengal" }
                    ]
                }
            ],
            "actions": [
                {
                    "type": "Action.Submit",
                    "title": "Submit",
                    "data": { "id": "1234567890" }
                }
            ]
        })),
        ..Attachment::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome_card_has_both_options() {
        let card = welcome_card("Fill Form", "Exit");
        assert_eq!(card.content_type.as_deref(), Some(HERO_CARD_CONTENT_TYPE));
        let content = card.content.unwrap();
        let buttons = content["buttons"].as_array().unwrap();
        assert_eq!(buttons.len(), 2);
        assert_eq!(buttons[0]["value"], "Fill Form");
        assert_eq!(buttons[1]["value"], "Exit");
    }

    #[test]
    fn details_card_collects_expected_inputs() {
        let card = details_form_card();
        assert_eq!(card.content_type.as_deref(), Some(ADAPTIVE_CARD_CONTENT_TYPE));
        let content = card.content.unwrap();
        let ids: Vec<&str> = content["body"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|el| el["id"].as_str())
            .collect();
        assert_eq!(ids, vec!["Name", "InsuredFor", "Email", "Date", "Region"]);
    }
}
