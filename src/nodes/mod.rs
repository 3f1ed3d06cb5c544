//! Per-type node definitions
//!
//! Each supported Schema.org type is a static [`Definer`]. The `define_*`
//! functions wrap caller input into a lazy [`NodeResolver`] for that type;
//! [`definer_for`] maps a `@type` name (including common subtypes) to its
//! definer for raw JSON input.

use serde_json::Value;

use crate::id::{id_reference, value_with_base};
use crate::input::NodeInput;
use crate::node::{extract_id, set_if_empty, Node};
use crate::resolver::{Definer, Graph, NodeResolver};

pub mod action;
pub mod address;
pub mod article;
pub mod breadcrumb;
pub mod comment;
pub mod creative_work;
pub mod event;
pub mod how_to;
pub mod image;
pub mod local_business;
pub mod offer;
pub mod organization;
pub mod person;
pub mod product;
pub mod question;
pub mod rating;
pub mod recipe;
pub mod software_app;
pub mod thing;
pub mod video;
pub mod webpage;
pub mod website;

/// Look up the definer responsible for a `@type` name
pub fn definer_for(type_name: &str) -> Option<&'static Definer> {
    let definer = match type_name {
        "Article" | "BlogPosting" | "NewsArticle" | "TechArticle" | "Report"
        | "ScholarlyArticle" | "SocialMediaPosting" => &article::ARTICLE,
        "WebPage" | "AboutPage" | "CheckoutPage" | "CollectionPage" | "ContactPage"
        | "FAQPage" | "ItemPage" | "MedicalWebPage" | "ProfilePage" | "QAPage"
        | "RealEstateListing" | "SearchResultsPage" => &webpage::WEBPAGE,
        "WebSite" => &website::WEBSITE,
        "Organization" | "Corporation" | "NGO" | "EducationalOrganization" => {
            &organization::ORGANIZATION
        }
        "LocalBusiness" | "Store" | "Restaurant" | "FoodEstablishment" | "ProfessionalService" => {
            &local_business::LOCAL_BUSINESS
        }
        "OpeningHoursSpecification" => &local_business::OPENING_HOURS,
        "PostalAddress" => &address::POSTAL_ADDRESS,
        "Person" => &person::PERSON,
        "ImageObject" => &image::IMAGE,
        "VideoObject" => &video::VIDEO,
        "BreadcrumbList" => &breadcrumb::BREADCRUMB,
        "ListItem" => &breadcrumb::LIST_ITEM,
        "Question" => &question::QUESTION,
        "Answer" => &question::ANSWER,
        "Product" => &product::PRODUCT,
        "Offer" => &offer::OFFER,
        "AggregateOffer" => &offer::AGGREGATE_OFFER,
        "Rating" => &rating::RATING,
        "AggregateRating" => &rating::AGGREGATE_RATING,
        "Review" => &rating::REVIEW,
        "Recipe" => &recipe::RECIPE,
        "HowTo" => &how_to::HOW_TO,
        "HowToStep" => &how_to::HOW_TO_STEP,
        "Comment" => &comment::COMMENT,
        "Event" => &event::EVENT,
        "Place" => &event::PLACE,
        "VirtualLocation" => &event::VIRTUAL_LOCATION,
        "CreativeWork" => &creative_work::CREATIVE_WORK,
        "ReadAction" => &action::READ_ACTION,
        "SearchAction" => &action::SEARCH_ACTION,
        "SoftwareApplication" | "MobileApplication" | "WebApplication" => {
            &software_app::SOFTWARE_APP
        }
        _ => return None,
    };
    Some(definer)
}

/// Wrap raw JSON input, routing it by its primary `@type`.
///
/// Unknown or missing types fall back to the generic Thing definer, which
/// only resolves ids and references.
pub fn define_typed(input: impl Into<NodeInput>) -> NodeResolver {
    let input = input.into();
    let type_name = input.get("@type").map(|f| f.snapshot()).and_then(|v| match v {
        Value::String(s) => Some(s),
        Value::Array(arr) => arr.first().and_then(|t| t.as_str()).map(String::from),
        _ => None,
    });
    let definer = type_name
        .as_deref()
        .and_then(definer_for)
        .unwrap_or(&thing::THING);
    NodeResolver::new(definer, input)
}

macro_rules! definers {
    ($($(#[$doc:meta])* $fn_name:ident => $definer:path),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $fn_name(input: impl Into<NodeInput>) -> NodeResolver {
                NodeResolver::new(&$definer, input)
            }
        )*
    };
}

definers! {
    define_article => article::ARTICLE,
    /// A page; its subtype is inferred from the canonical url
    define_web_page => webpage::WEBPAGE,
    define_web_site => website::WEBSITE,
    /// An organization, registered as the site identity unless given another `@id`
    define_organization => organization::ORGANIZATION,
    define_local_business => local_business::LOCAL_BUSINESS,
    define_opening_hours => local_business::OPENING_HOURS,
    define_postal_address => address::POSTAL_ADDRESS,
    /// A person, registered as the site identity unless given another `@id`
    define_person => person::PERSON,
    define_image => image::IMAGE,
    define_video => video::VIDEO,
    define_breadcrumb => breadcrumb::BREADCRUMB,
    define_list_item => breadcrumb::LIST_ITEM,
    define_question => question::QUESTION,
    define_product => product::PRODUCT,
    define_offer => offer::OFFER,
    define_aggregate_offer => offer::AGGREGATE_OFFER,
    define_rating => rating::RATING,
    define_aggregate_rating => rating::AGGREGATE_RATING,
    define_review => rating::REVIEW,
    define_recipe => recipe::RECIPE,
    define_how_to => how_to::HOW_TO,
    define_how_to_step => how_to::HOW_TO_STEP,
    define_comment => comment::COMMENT,
    define_event => event::EVENT,
    define_place => event::PLACE,
    define_virtual_location => event::VIRTUAL_LOCATION,
    define_creative_work => creative_work::CREATIVE_WORK,
    define_read_action => action::READ_ACTION,
    define_search_action => action::SEARCH_ACTION,
    define_software_app => software_app::SOFTWARE_APP,
    define_thing => thing::THING,
}

/// Make url-valued fields absolute against `base`
pub(crate) fn resolve_urls(node: &mut Node, keys: &[&str], base: &str) {
    for key in keys {
        if let Some(value) = node.get_mut(*key) {
            *value = match &*value {
                Value::Array(items) => {
                    Value::Array(items.iter().map(|v| value_with_base(base, v)).collect())
                }
                other => value_with_base(base, other),
            };
        }
    }
}

/// Turn a string into a one-field node, e.g. `"Jane"` into `{"name": "Jane"}`
pub(crate) fn cast_string_to(value: &Value, key: &str) -> Option<Node> {
    match value {
        Value::String(s) => {
            let mut node = Node::new();
            node.insert(key.to_string(), Value::String(s.clone()));
            Some(node)
        }
        Value::Object(obj) => Some(obj.clone()),
        _ => None,
    }
}

/// Point `key` of the node at `idx` to the node found under `target`,
/// unless the field is already set. Returns whether the target exists.
pub(crate) fn link_to(graph: &mut Graph, idx: usize, key: &str, target: &str) -> bool {
    let Some(target_id) = graph.find_id(target) else {
        return false;
    };
    if extract_id(graph.node(idx)) != Some(target_id.as_str()) {
        set_if_empty(graph.node_mut(idx), key, id_reference(&target_id));
    }
    true
}

/// Point `key` of the node found under `target` back at the node at `idx`
pub(crate) fn link_from(graph: &mut Graph, target: &str, key: &str, idx: usize) {
    let Some(own_id) = extract_id(graph.node(idx)).map(String::from) else {
        return;
    };
    if let Some(target_idx) = graph.find(target) {
        if target_idx != idx {
            set_if_empty(graph.node_mut(target_idx), key, id_reference(&own_id));
        }
    }
}

/// `@id` of the node at `idx`, as a reference
pub(crate) fn reference_to(graph: &Graph, idx: usize) -> Option<Value> {
    extract_id(graph.node(idx)).map(id_reference)
}
