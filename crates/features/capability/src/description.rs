use crate::build::{capability_container, capability_set};
use crate::definition::{CAPABILITY_SET_ID, CapabilityTemplate, ContainerDefinition, DEFAULT_ID_SHORT};
use crate::error::{CapabilityError, CapabilityErrorExt, CapabilityResult};
use crate::sections::CapabilityContainer;
use serde_json::Value as Json;
use tracing::{debug, info, warn};
use twin_codec::Canonicalizer;
use twin_domain::config::RepositoryConfig;
use twin_domain::semantics::{CAPABILITY_DESCRIPTION, CAPABILITY_SET};
use twin_kernel::identifier::submodel_identifier;
use twin_model::{Identity, Lookup, ModelType, ModelingKind, Node, NodeId, Reference, Tree};

/// The offered capability description submodel: a capability set holding one
/// container per capability.
#[derive(Debug, Clone)]
pub struct CapabilityDescription {
    tree: Tree,
    root: NodeId,
    set: NodeId,
}

impl CapabilityDescription {
    pub fn builder() -> CapabilityDescriptionBuilder {
        CapabilityDescriptionBuilder::new()
    }

    /// Reads a capability description. A document without capability set gets an empty one.
    ///
    /// # Errors
    /// [`CapabilityError::Codec`] when the document has no object root.
    pub fn parse(document: &Json) -> CapabilityResult<Self> {
        let (mut tree, root) = twin_codec::read(document).context("Parsing capability description")?;
        let semantic_id = Reference::external(CAPABILITY_SET);
        let found = tree
            .find(root, Lookup::SemanticId(&semantic_id))
            .or_else(|| tree.find(root, Lookup::IdShort(CAPABILITY_SET_ID)));
        let set = match found {
            Some(set) => set,
            None => {
                warn!("capability description without capability set");
                tree.append(root, empty_set())
                    .ok_or_else(|| CapabilityError::from("Capability description root is not a container"))?
            },
        };
        Ok(Self { tree, root, set })
    }

    #[must_use]
    pub const fn tree(&self) -> &Tree {
        &self.tree
    }

    pub const fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    #[must_use]
    pub const fn capability_set(&self) -> NodeId {
        self.set
    }

    #[must_use]
    pub fn identifier(&self) -> &str {
        self.tree
            .get(self.root)
            .and_then(|node| node.identity.as_ref())
            .map_or("", |identity| identity.id.as_str())
    }

    #[must_use]
    pub fn id_short(&self) -> &str {
        self.tree.get(self.root).map_or("", Node::id_short)
    }

    /// Takes identity and capability set from `template`.
    ///
    /// Nothing changes when the template is rejected.
    ///
    /// # Errors
    /// [`CapabilityError::Definition`] for a blank identifier or an invalid container.
    pub fn apply(&mut self, template: &CapabilityTemplate) -> CapabilityResult<()> {
        if template.identifier.trim().is_empty() {
            return Err(CapabilityError::Definition {
                message: "template identifier must be provided".into(),
                context: None,
            });
        }
        for container in &template.capability_set.containers {
            container.validate().context("Applying capability template")?;
        }

        let set = capability_set(&mut self.tree, &template.capability_set);
        let removed = self.tree.clear(self.root);
        if !self.tree.add(self.root, set) {
            self.tree.destroy(set);
            return Err(CapabilityError::from("Capability description root is not a container"));
        }
        self.set = set;

        if let Some(root) = self.tree.get_mut(self.root) {
            if let Some(id_short) = template.id_short.as_deref().filter(|id| !id.trim().is_empty()) {
                root.id_short = Some(id_short.to_owned());
            }
            let kind = root.identity.as_ref().map(|identity| identity.kind).unwrap_or_default();
            root.identity = Some(Identity { id: template.identifier.clone(), kind });
            if let Some(semantic_id) = &template.semantic_id {
                root.semantic_id = semantic_id.clone();
            }
        }

        info!(
            identifier = template.identifier.as_str(),
            containers = template.capability_set.containers.len(),
            removed,
            "capability template applied"
        );
        Ok(())
    }

    /// Builds a container from `definition` and appends it to the capability set.
    ///
    /// # Errors
    /// [`CapabilityError::Definition`] when the definition is invalid.
    pub fn add_container(&mut self, definition: &ContainerDefinition) -> CapabilityResult<CapabilityContainer> {
        definition.validate()?;
        let container = capability_container(&mut self.tree, definition);
        if !self.tree.add(self.set, container) {
            self.tree.destroy(container);
            return Err(CapabilityError::from("Capability set is missing"));
        }
        debug!(container = definition.id_short.as_str(), "capability container added");
        CapabilityContainer::from_node(&self.tree, container)
            .ok_or_else(|| CapabilityError::from("Capability container was not built as a collection"))
    }

    /// Every collection in the capability set.
    #[must_use]
    pub fn containers(&self) -> Vec<CapabilityContainer> {
        self.tree
            .children(self.set)
            .iter()
            .filter_map(|id| CapabilityContainer::from_node(&self.tree, *id))
            .collect()
    }

    /// The capability elements of all containers.
    #[must_use]
    pub fn capabilities(&self) -> Vec<NodeId> {
        self.containers()
            .into_iter()
            .flat_map(|container| self.tree.children(container.id()).iter().copied())
            .filter(|id| self.tree.get(*id).is_some_and(|node| node.model_type == ModelType::Capability))
            .collect()
    }

    /// Non-blank idShorts of all capability elements.
    #[must_use]
    pub fn capability_names(&self) -> Vec<&str> {
        self.capabilities()
            .into_iter()
            .filter_map(|id| self.tree.get(id).map(Node::id_short))
            .filter(|name| !name.trim().is_empty())
            .collect()
    }

    /// Case-insensitive lookup of a container by idShort. Blank names match nothing.
    #[must_use]
    pub fn find_container(&self, id_short: &str) -> Option<CapabilityContainer> {
        if id_short.trim().is_empty() {
            return None;
        }
        self.containers()
            .into_iter()
            .find(|container| container.id_short(&self.tree).eq_ignore_ascii_case(id_short))
    }

    /// # Errors
    /// [`CapabilityError::Codec`] if canonicalization fails.
    pub fn to_value(&self, canonicalizer: &Canonicalizer) -> CapabilityResult<Json> {
        let document = twin_codec::write(&self.tree, self.root).context("Writing capability description")?;
        canonicalizer.canonicalize(document).context("Canonicalizing capability description")
    }

    /// # Errors
    /// [`CapabilityError::Codec`] if canonicalization fails.
    pub fn to_json(&self) -> CapabilityResult<String> {
        Canonicalizer::default()
            .serialize(&self.tree, self.root)
            .context("Serializing capability description")
    }
}

fn empty_set() -> Node {
    Node::collection(CAPABILITY_SET_ID).with_semantic_id(Reference::external(CAPABILITY_SET))
}

/// A fluent builder for an empty [`CapabilityDescription`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct CapabilityDescriptionBuilder {
    identifier: Option<String>,
    prefix: Option<String>,
    id_short: Option<String>,
}

impl CapabilityDescriptionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Takes the identifier prefix from the repository settings.
    pub fn config(mut self, config: &RepositoryConfig) -> Self {
        self.prefix = Some(config.submodel_prefix.clone());
        self
    }

    pub fn id_short(mut self, id_short: impl Into<String>) -> Self {
        self.id_short = Some(id_short.into());
        self
    }

    pub fn build(self) -> CapabilityDescription {
        let identifier = self.identifier.unwrap_or_else(|| {
            let prefix = self.prefix.unwrap_or_else(|| RepositoryConfig::default().submodel_prefix);
            submodel_identifier(&prefix)
        });
        let id_short = self.id_short.unwrap_or_else(|| DEFAULT_ID_SHORT.to_owned());

        let mut tree = Tree::new();
        let root = tree.insert(
            Node::submodel(id_short, identifier.as_str(), ModelingKind::Instance)
                .with_semantic_id(Reference::external(CAPABILITY_DESCRIPTION)),
        );
        let set = tree.insert(empty_set());
        tree.add(root, set);

        info!(%identifier, "capability description created");
        CapabilityDescription { tree, root, set }
    }
}
