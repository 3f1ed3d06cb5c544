//! Recipe

use serde_json::Value;

use crate::config::{opt_value, ResolveContext};
use crate::date::{coerce_fields, to_iso};
use crate::id::IdScope;
use crate::node::Node;
use crate::nodes::{how_to, image, link_to, person, rating, video};
use crate::resolver::{object_cast, Definer, Graph, IdStrategy, ResolveScope};
use crate::vocab::{IDENTITY_ID, RECIPE_ID, WEBPAGE_ID};

pub static RECIPE: Definer = Definer {
    name: "Recipe",
    default_type: "Recipe",
    id: IdStrategy::Fixed {
        scope: IdScope::Url,
        fragment: RECIPE_ID,
    },
    nested_id: IdStrategy::Fixed {
        scope: IdScope::Url,
        fragment: RECIPE_ID,
    },
    required: &["name", "image", "recipeIngredient", "recipeInstructions"],
    cast: object_cast,
    defaults: recipe_defaults,
    resolve: resolve_recipe,
    merge_relations: merge_recipe,
};

fn recipe_defaults(ctx: &ResolveContext) -> Node {
    let mut node = Node::new();
    node.insert("name".to_string(), opt_value(ctx.meta.title.as_deref()));
    node.insert(
        "description".to_string(),
        opt_value(ctx.meta.description.as_deref()),
    );
    node.insert("image".to_string(), opt_value(ctx.meta.image.as_deref()));
    node.insert("inLanguage".to_string(), opt_value(ctx.language()));
    node
}

fn resolve_recipe(mut node: Node, scope: &mut ResolveScope<'_>) -> Node {
    coerce_fields(&mut node, &["datePublished"], to_iso);
    scope.resolve_field(&mut node, "image", &image::IMAGE, true);
    scope.resolve_field(&mut node, "author", &person::PERSON, true);
    scope.resolve_field(&mut node, "video", &video::VIDEO, true);
    scope.resolve_field(&mut node, "recipeInstructions", &how_to::HOW_TO_STEP, false);
    scope.resolve_field(&mut node, "aggregateRating", &rating::AGGREGATE_RATING, false);

    if let Some(slot) = node.get_mut("recipeIngredient") {
        if slot.is_string() {
            *slot = Value::Array(vec![std::mem::take(slot)]);
        }
    }
    node
}

fn merge_recipe(idx: usize, graph: &mut Graph, _: &ResolveContext) {
    link_to(graph, idx, "mainEntityOfPage", WEBPAGE_ID);
    link_to(graph, idx, "author", IDENTITY_ID);
}
