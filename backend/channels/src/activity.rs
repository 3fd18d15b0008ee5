//! Bot Framework activity wire types.
//!
//! A deliberately minimal subset of the Bot Connector schema: just
//! the fields the EKYC flow reads and writes. Unknown fields on
//! inbound payloads are ignored.

use serde::{Deserialize, Serialize};

/// A user or bot account on a channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelAccount {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The conversation an activity belongs to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationAccount {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// A card or file attached to an activity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Attachment {
    pub fn is_image(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.contains("image"))
            .unwrap_or(false)
    }
}

/// One Bot Framework activity (message, conversation update, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(rename = "type", default)]
    pub activity_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<ChannelAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<ChannelAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation: Option<ConversationAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Adaptive-card submit payload, when the user pressed Submit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,

    /// Accounts added on a `conversationUpdate` activity.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members_added: Vec<ChannelAccount>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_id: Option<String>,
}

impl Activity {
    pub fn is_message(&self) -> bool {
        self.activity_type == "message"
    }

    pub fn is_conversation_update(&self) -> bool {
        self.activity_type == "conversationUpdate"
    }

    /// The first attached image, if the user uploaded one.
    pub fn first_image_attachment(&self) -> Option<&Attachment> {
        self.attachments.first().filter(|a| a.is_image())
    }

    /// Skeleton of a reply addressed back to this activity's sender.
    fn reply_skeleton(&self) -> Activity {
        Activity {
            activity_type: "message".into(),
            channel_id: self.channel_id.clone(),
            service_url: self.service_url.clone(),
            from: self.recipient.clone(),
            recipient: self.from.clone(),
            conversation: self.conversation.clone(),
            locale: self.locale.clone(),
            reply_to_id: self.id.clone(),
            ..Activity::default()
        }
    }

    pub fn reply_with_text(&self, text: impl Into<String>) -> Activity {
        Activity {
            text: Some(text.into()),
            ..self.reply_skeleton()
        }
    }

    pub fn reply_with_attachment(&self, attachment: Attachment) -> Activity {
        Activity {
            attachments: vec![attachment],
            ..self.reply_skeleton()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_inbound_message_activity() {
        let json = r#"{
            "type": "message",
            "id": "act-1",
            "channelId": "msteams",
            "serviceUrl": "https://smba.trafficmanager.net/in/",
            "from": { "id": "user-1", "name": "Asha" },
            "recipient": { "id": "bot-1" },
            "conversation": { "id": "conv-1" },
            "text": "Fill Form",
            "entities": [{ "type": "clientInfo" }]
        }"#;
        let activity: Activity = serde_json::from_str(json).unwrap();
        assert!(activity.is_message());
        assert_eq!(activity.channel_id.as_deref(), Some("msteams"));
        assert_eq!(activity.text.as_deref(), Some("Fill Form"));
        assert!(activity.attachments.is_empty());
    }

    #[test]
    fn reply_swaps_from_and_recipient() {
        let inbound: Activity = serde_json::from_str(
            r#"{
                "type": "message",
                "id": "act-2",
                "from": { "id": "user-1" },
                "recipient": { "id": "bot-1" },
                "conversation": { "id": "conv-1" },
                "text": "hello"
            }"#,
        )
        .unwrap();
        let reply = inbound.reply_with_text("hi there");
        assert_eq!(reply.from.unwrap().id.as_deref(), Some("bot-1"));
        assert_eq!(reply.recipient.unwrap().id.as_deref(), Some("user-1"));
        assert_eq!(reply.reply_to_id.as_deref(), Some("act-2"));
        assert_eq!(reply.text.as_deref(), Some("hi there"));
    }

    #[test]
    fn image_attachment_detection() {
        let mut activity = Activity::default();
        assert!(activity.first_image_attachment().is_none());

        activity.attachments.push(Attachment {
            content_type: Some("image/png".into()),
            content_url: Some("https://example.com/card.png".into()),
            ..Attachment::default()
        });
        assert!(activity.first_image_attachment().is_some());

        let pdf = Activity {
            attachments: vec![Attachment {
                content_type: Some("application/pdf".into()),
                ..Attachment::default()
            }],
            ..Activity::default()
        };
        assert!(pdf.first_image_attachment().is_none());
    }

    #[test]
    fn outbound_serialization_is_camel_case() {
        let inbound: Activity = serde_json::from_str(
            r#"{
                "type": "message",
                "id": "act-3",
                "serviceUrl": "https://example.org",
                "conversation": { "id": "conv-9" }
            }"#,
        )
        .unwrap();
        let json = serde_json::to_value(inbound.reply_with_text("ok")).unwrap();
        assert_eq!(json["type"], "message");
        assert_eq!(json["serviceUrl"], "https://example.org");
        assert_eq!(json["replyToId"], "act-3");
        assert!(json.get("attachments").is_none());
    }
}
