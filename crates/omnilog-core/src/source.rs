//! Description of the UI element that triggered an event.
//!
//! An [`EventSource`] is supplied fresh on every user-driven call. Its
//! absence marks an event as application-generated.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of UI element that was acted upon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    Button,
    Link,
    Image,
    Paragraph,
    SelectBox,
    Checkbox,
    Input,
    Card,
    Menu,
    MenuItem,
    Video,
    VideoControl,
}

/// The input device that acted upon the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    Touch,
    Click,
    Keyboard,
}

/// The domain entity associated with the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Photo,
    Product,
    Story,
    User,
    Pro,
    ProPlus,
    Comment,
    Question,
    Answer,
    UniversalIdeabook,
    Project,
    PhotoTopic,
    ProductTopic,
    ProTopic,
    DiscussionTopic,
    IdeabookTopic,
    SaleGallery,
    Newsletter,
    ProReview,
    ProductReview,
    ProductTag,
    ProductVariationSelector,
    Ad,
    Video,
}

/// The UI element that triggered an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSource {
    /// The element type.
    pub element_type: ElementType,
    /// Text label shown on the element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_label: Option<String>,
    /// Input device used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<InputType>,
    /// Entity kind the element refers to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<EntityType>,
    /// Identifier of that entity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    /// Section containing the element, e.g. "header" or "related photos".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Component containing the element, e.g. "pro card".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    /// 1-based position within a list.
    #[serde(rename = "positionId", default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    /// Ad-slot placement, e.g. "top" or "left rail".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<String>,
    /// Ad campaign id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<String>,
    /// Ad creative id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creative_id: Option<String>,
    /// Experience on which the element is rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_id: Option<Uuid>,
    /// Flow on which the element is rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_id: Option<Uuid>,
}

impl EventSource {
    /// Creates a source for `element_type` with every other attribute unset.
    #[must_use]
    pub fn new(element_type: ElementType) -> Self {
        Self {
            element_type,
            element_label: None,
            input_type: None,
            entity_type: None,
            entity_id: None,
            section: None,
            component: None,
            position: None,
            placement: None,
            campaign_id: None,
            creative_id: None,
            experience_id: None,
            flow_id: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.element_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_input(mut self, input_type: InputType) -> Self {
        self.input_type = Some(input_type);
        self
    }

    /// Associates a domain entity with the element.
    #[must_use]
    pub fn with_entity(mut self, entity_type: EntityType, entity_id: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type);
        self.entity_id = Some(entity_id.into());
        self
    }

    #[must_use]
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    #[must_use]
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: u32) -> Self {
        self.position = Some(position);
        self
    }

    /// Attaches ad metadata: slot placement, campaign and creative ids.
    #[must_use]
    pub fn with_ad(
        mut self,
        placement: impl Into<String>,
        campaign_id: impl Into<String>,
        creative_id: impl Into<String>,
    ) -> Self {
        self.placement = Some(placement.into());
        self.campaign_id = Some(campaign_id.into());
        self.creative_id = Some(creative_id.into());
        self
    }

    /// Records the experience the element was rendered on. When passed to an
    /// experience load, this id becomes the new experience's referrer.
    #[must_use]
    pub fn with_experience_id(mut self, experience_id: Uuid) -> Self {
        self.experience_id = Some(experience_id);
        self
    }

    #[must_use]
    pub fn with_flow_id(mut self, flow_id: Uuid) -> Self {
        self.flow_id = Some(flow_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_only_requested_fields() {
        // Arrange / Act
        let source = EventSource::new(ElementType::Button)
            .with_label("Sign up")
            .with_input(InputType::Click)
            .with_position(3);

        // Assert
        assert_eq!(source.element_type, ElementType::Button);
        assert_eq!(source.element_label.as_deref(), Some("Sign up"));
        assert_eq!(source.input_type, Some(InputType::Click));
        assert_eq!(source.position, Some(3));
        assert!(source.entity_type.is_none());
        assert!(source.experience_id.is_none());
    }

    #[test]
    fn test_serializes_camel_case_keys_with_snake_case_values() {
        let source = EventSource::new(ElementType::MenuItem)
            .with_entity(EntityType::ProductVariationSelector, "sku-1")
            .with_position(2);

        let json = serde_json::to_value(&source).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "elementType": "menu_item",
                "entityType": "product_variation_selector",
                "entityId": "sku-1",
                "positionId": 2,
            })
        );
    }

    #[test]
    fn test_deserializes_minimal_source() {
        let source: EventSource =
            serde_json::from_str(r#"{"elementType":"video_control","inputType":"touch"}"#)
                .unwrap();

        assert_eq!(source.element_type, ElementType::VideoControl);
        assert_eq!(source.input_type, Some(InputType::Touch));
        assert!(source.section.is_none());
    }
}
