//! URL path algebra
//!
//! Paths are derived from the linked parent chain: each ancestor contributes
//! its prefix, and a slug placeholder unless the child marks it as a
//! collection boundary. Segments always come out root first.
//!
//! Copyright (c) 2025 Apidef Team
//! Licensed under the Apache-2.0 license

use crate::graph::{ResourceGraph, ResourceId};
use crate::model::Interaction;

/// Render a slug placeholder segment, e.g. `{id}`
pub fn slug_placeholder(slug: &str) -> String {
    format!("{{{}}}", slug)
}

/// Ordered URL segments for a resource, optionally in the context of one
/// of its interactions.
///
/// Ancestors are always treated as collections at their own level. A trailing
/// slug for the resource itself is only added for single-instance `get`,
/// `update` and `destroy` interactions.
pub fn segments(
    graph: &ResourceGraph,
    id: ResourceId,
    interaction: Option<&Interaction>,
) -> Vec<String> {
    let resource = graph.get(id);

    let mut pieces = match resource.parent() {
        Some(parent_id) => {
            let mut pieces = segments(graph, parent_id, None);
            if !resource.parent_is_collection() {
                pieces.push(slug_placeholder(graph.get(parent_id).url_slug()));
            }
            pieces
        }
        None => Vec::new(),
    };

    pieces.push(resource.url_prefix().to_string());

    if let Some(interaction) = interaction {
        let addresses_instance = interaction
            .verb()
            .map(|verb| verb.expects_slug())
            .unwrap_or(false);
        if addresses_instance && !interaction.accept_many {
            pieces.push(slug_placeholder(resource.url_slug()));
        }
    }

    pieces
}

/// Full path string: the segments joined by `/`
pub fn path(graph: &ResourceGraph, id: ResourceId, interaction: Option<&Interaction>) -> String {
    segments(graph, id, interaction).join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResourceDefinition;

    fn resource(id: &str, prefix: &str, slug: &str, parent: Option<&str>, collection: bool) -> ResourceDefinition {
        ResourceDefinition {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            parent: parent.map(str::to_string),
            parent_is_collection: collection,
            url_slug: slug.to_string(),
            url_prefix: prefix.to_string(),
            properties: Vec::new(),
            interactions: Vec::new(),
        }
    }

    fn interaction(verb: &str, accept_many: bool) -> Interaction {
        Interaction {
            id: verb.to_string(),
            name: verb.to_string(),
            verb: verb.to_string(),
            description: String::new(),
            params: Vec::new(),
            accept_many,
        }
    }

    fn family() -> ResourceGraph {
        ResourceGraph::from_definitions(
            "t",
            vec![
                resource("root", "roots", "id", None, false),
                resource("child", "children", "name", Some("root"), false),
                resource("orphan", "orphans", "birthday", Some("root"), true),
                resource("grandchild", "grandchildren", "id", Some("child"), false),
                resource("orphanChild", "orphanchildren", "id", Some("orphan"), false),
                resource("childOrphan", "orphans", "name", Some("child"), true),
                resource("orphanOrphan", "orphans", "name", Some("orphan"), true),
            ],
        )
        .unwrap()
    }

    fn pieces(graph: &ResourceGraph, key: &str, interaction: &Interaction) -> Vec<String> {
        segments(graph, graph.find(key).unwrap(), Some(interaction))
    }

    #[test]
    fn test_collection_verbs_have_no_trailing_slug() {
        let graph = family();
        for verb in ["list", "create"] {
            let i = interaction(verb, false);
            assert_eq!(pieces(&graph, "t/root", &i), vec!["roots"]);
            assert_eq!(pieces(&graph, "t/child", &i), vec!["roots", "{id}", "children"]);
            assert_eq!(pieces(&graph, "t/orphan", &i), vec!["roots", "orphans"]);
            assert_eq!(
                pieces(&graph, "t/grandchild", &i),
                vec!["roots", "{id}", "children", "{name}", "grandchildren"]
            );
            assert_eq!(
                pieces(&graph, "t/orphanChild", &i),
                vec!["roots", "orphans", "{birthday}", "orphanchildren"]
            );
            assert_eq!(
                pieces(&graph, "t/childOrphan", &i),
                vec!["roots", "{id}", "children", "orphans"]
            );
            assert_eq!(pieces(&graph, "t/orphanOrphan", &i), vec!["roots", "orphans", "orphans"]);
        }
    }

    #[test]
    fn test_instance_verbs_append_own_slug() {
        let graph = family();
        for verb in ["get", "update", "destroy"] {
            let i = interaction(verb, false);
            assert_eq!(pieces(&graph, "t/root", &i), vec!["roots", "{id}"]);
            assert_eq!(pieces(&graph, "t/child", &i), vec!["roots", "{id}", "children", "{name}"]);
            assert_eq!(pieces(&graph, "t/orphan", &i), vec!["roots", "orphans", "{birthday}"]);
            assert_eq!(
                pieces(&graph, "t/grandchild", &i),
                vec!["roots", "{id}", "children", "{name}", "grandchildren", "{id}"]
            );
            assert_eq!(
                pieces(&graph, "t/orphanChild", &i),
                vec!["roots", "orphans", "{birthday}", "orphanchildren", "{id}"]
            );
            assert_eq!(
                pieces(&graph, "t/childOrphan", &i),
                vec!["roots", "{id}", "children", "orphans", "{name}"]
            );
            assert_eq!(
                pieces(&graph, "t/orphanOrphan", &i),
                vec!["roots", "orphans", "orphans", "{name}"]
            );
        }
    }

    #[test]
    fn test_batch_interactions_have_no_trailing_slug() {
        let graph = family();
        let destroy_many = interaction("destroy", true);
        let create_many = interaction("create", true);
        assert_eq!(pieces(&graph, "t/child", &destroy_many), vec!["roots", "{id}", "children"]);
        assert_eq!(pieces(&graph, "t/orphan", &create_many), vec!["roots", "orphans"]);
    }

    #[test]
    fn test_path_joins_segments() {
        let graph = family();
        let child = graph.find("t/child").unwrap();
        assert_eq!(path(&graph, child, None), "roots/{id}/children");
        assert_eq!(path(&graph, child, Some(&interaction("get", false))), "roots/{id}/children/{name}");
    }
}
