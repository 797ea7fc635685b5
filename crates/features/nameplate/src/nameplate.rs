use crate::data::{AddressData, EmailData, NameplateData, PhoneData};
use crate::error::{NameplateErrorExt, NameplateResult};
use serde_json::Value as Json;
use tracing::{debug, info};
use twin_codec::Canonicalizer;
use twin_domain::config::RepositoryConfig;
use twin_domain::semantics::{
    NAMEPLATE, NAMEPLATE_ADDRESS_INFORMATION, NAMEPLATE_CITY_TOWN, NAMEPLATE_EMAIL,
    NAMEPLATE_EMAIL_ADDRESS, NAMEPLATE_MANUFACTURER_NAME,
    NAMEPLATE_MANUFACTURER_PRODUCT_DESIGNATION, NAMEPLATE_MANUFACTURER_PRODUCT_DESIGNATION_SUPPLEMENT,
    NAMEPLATE_NATIONAL_CODE, NAMEPLATE_ORDER_CODE_OF_MANUFACTURER,
    NAMEPLATE_ORDER_CODE_OF_MANUFACTURER_SUPPLEMENT, NAMEPLATE_PHONE, NAMEPLATE_STATE_COUNTY,
    NAMEPLATE_STREET, NAMEPLATE_TELEPHONE_NUMBER, NAMEPLATE_TYPE_OF_EMAIL_ADDRESS,
    NAMEPLATE_TYPE_OF_TELEPHONE, NAMEPLATE_URI_OF_THE_MANUFACTURER, NAMEPLATE_ZIPCODE,
};
use twin_kernel::identifier::submodel_identifier;
use twin_model::{
    DataType, LangString, ModelingKind, Node, NodeId, Qualifier, Reference, Scalar, Tree, Value,
};

const NAMEPLATE_ID: &str = "Nameplate";
const URI_OF_THE_MANUFACTURER: &str = "URIOfTheManufacturer";
const MANUFACTURER_NAME: &str = "ManufacturerName";
const MANUFACTURER_PRODUCT_DESIGNATION: &str = "ManufacturerProductDesignation";
const ADDRESS_INFORMATION: &str = "Addressinformation";
const STREET: &str = "Street";
const ZIPCODE: &str = "Zipcode";
const CITY_TOWN: &str = "CityTown";
const STATE_COUNTY: &str = "StateCounty";
const NATIONAL_CODE: &str = "NationalCode";
const PHONE: &str = "Phone01";
const TELEPHONE_NUMBER: &str = "TelephoneNumber";
const TYPE_OF_TELEPHONE: &str = "TypeOfTelephone";
const EMAIL: &str = "Email01";
const EMAIL_ADDRESS: &str = "EmailAddress";
const TYPE_OF_EMAIL_ADDRESS: &str = "TypeOfEmailAddress";
const ORDER_CODE_OF_MANUFACTURER: &str = "OrderCodeOfManufacturer";

const PARAMETER: &str = "PARAMETER";
const VARIABLE: &str = "VARIABLE";
const MULTIPLICITY: &str = "Multiplicity";

/// The nameplate submodel of a production island.
///
/// Its elements are rebuilt wholesale by [`Nameplate::apply`]; reading goes
/// through [`Nameplate::data`].
#[derive(Debug, Clone)]
pub struct Nameplate {
    tree: Tree,
    root: NodeId,
}

impl Nameplate {
    pub fn builder() -> NameplateBuilder {
        NameplateBuilder::new()
    }

    /// # Errors
    /// [`NameplateError::Codec`](crate::NameplateError::Codec) when the document has no object root.
    pub fn parse(document: &Json) -> NameplateResult<Self> {
        let (tree, root) = twin_codec::read(document).context("Parsing nameplate")?;
        Ok(Self { tree, root })
    }

    #[must_use]
    pub const fn tree(&self) -> &Tree {
        &self.tree
    }

    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    #[must_use]
    pub fn identifier(&self) -> &str {
        self.tree
            .get(self.root)
            .and_then(|node| node.identity.as_ref())
            .map_or("", |identity| identity.id.as_str())
    }

    /// Replaces the submodel description and every element with `data`.
    pub fn apply(&mut self, data: &NameplateData) {
        if let Some(root) = self.tree.get_mut(self.root) {
            root.description.clone_from(&data.description);
        }
        let removed = self.tree.clear(self.root);

        let tree = &mut self.tree;
        let root = self.root;
        let mut uri =
            Node::property(URI_OF_THE_MANUFACTURER, DataType::AnyUri, data.manufacturer_uri.as_str())
                .with_semantic_id(Reference::external(NAMEPLATE_URI_OF_THE_MANUFACTURER))
                .with_qualifier(Qualifier::new(MULTIPLICITY, DataType::String, Some("One".to_owned())));
        uri.description.clone_from(&data.manufacturer_uri_description);
        tree.append(root, uri);
        tree.append(
            root,
            texts(MANUFACTURER_NAME, NAMEPLATE_MANUFACTURER_NAME, &data.manufacturer_name)
                .with_category(PARAMETER),
        );
        let mut designation = texts(
            MANUFACTURER_PRODUCT_DESIGNATION,
            NAMEPLATE_MANUFACTURER_PRODUCT_DESIGNATION,
            &data.manufacturer_product_designation,
        );
        designation
            .supplemental_semantic_ids
            .push(Reference::external(NAMEPLATE_MANUFACTURER_PRODUCT_DESIGNATION_SUPPLEMENT));
        tree.append(root, designation);
        append_address(tree, root, &data.address);

        let mut order_code = Node::string_property(ORDER_CODE_OF_MANUFACTURER, data.order_code_of_manufacturer.as_str())
            .with_semantic_id(Reference::external(NAMEPLATE_ORDER_CODE_OF_MANUFACTURER));
        order_code
            .supplemental_semantic_ids
            .push(Reference::external(NAMEPLATE_ORDER_CODE_OF_MANUFACTURER_SUPPLEMENT));
        tree.append(root, order_code);

        debug!(removed, "nameplate elements rebuilt");
    }

    /// Reads the current values back. Missing elements read as empty.
    #[must_use]
    pub fn data(&self) -> NameplateData {
        let address = |leaf: &str| self.texts_at(&[ADDRESS_INFORMATION, leaf]);
        NameplateData {
            description: self.tree.get(self.root).map(|root| root.description.clone()).unwrap_or_default(),
            manufacturer_uri: self.text_at(&[URI_OF_THE_MANUFACTURER]),
            manufacturer_uri_description: self
                .tree
                .find_path(self.root, &[URI_OF_THE_MANUFACTURER])
                .and_then(|id| self.tree.get(id))
                .map(|node| node.description.clone())
                .unwrap_or_default(),
            manufacturer_name: self.texts_at(&[MANUFACTURER_NAME]),
            manufacturer_product_designation: self.texts_at(&[MANUFACTURER_PRODUCT_DESIGNATION]),
            address: AddressData {
                street: address(STREET),
                zipcode: address(ZIPCODE),
                city_town: address(CITY_TOWN),
                state_county: address(STATE_COUNTY),
                national_code: address(NATIONAL_CODE),
                phone: PhoneData {
                    number: self.texts_at(&[ADDRESS_INFORMATION, PHONE, TELEPHONE_NUMBER]),
                    type_of_telephone: self.text_at(&[ADDRESS_INFORMATION, PHONE, TYPE_OF_TELEPHONE]),
                },
                email: EmailData {
                    address: self.text_at(&[ADDRESS_INFORMATION, EMAIL, EMAIL_ADDRESS]),
                    type_of_email_address: self.text_at(&[ADDRESS_INFORMATION, EMAIL, TYPE_OF_EMAIL_ADDRESS]),
                },
            },
            order_code_of_manufacturer: self.text_at(&[ORDER_CODE_OF_MANUFACTURER]),
        }
    }

    /// Manufacturer name in `language`, falling back to the first entry.
    #[must_use]
    pub fn manufacturer_name(&self, language: &str) -> Option<String> {
        let names = self.texts_at(&[MANUFACTURER_NAME]);
        names
            .iter()
            .find(|entry| entry.language.eq_ignore_ascii_case(language))
            .or_else(|| names.first())
            .map(|entry| entry.text.clone())
    }

    /// # Errors
    /// [`NameplateError::Codec`](crate::NameplateError::Codec) if canonicalization fails.
    pub fn to_value(&self, canonicalizer: &Canonicalizer) -> NameplateResult<Json> {
        let document = twin_codec::write(&self.tree, self.root).context("Writing nameplate")?;
        canonicalizer.canonicalize(document).context("Canonicalizing nameplate")
    }

    /// # Errors
    /// [`NameplateError::Codec`](crate::NameplateError::Codec) if canonicalization fails.
    pub fn to_json(&self) -> NameplateResult<String> {
        Canonicalizer::default().serialize(&self.tree, self.root).context("Serializing nameplate")
    }

    fn texts_at(&self, path: &[&str]) -> Vec<LangString> {
        self.tree
            .find_path(self.root, path)
            .and_then(|id| self.tree.get(id))
            .and_then(|node| match &node.value {
                Value::Scalar(Scalar::MultiLanguage(texts)) => Some(texts.clone()),
                _ => None,
            })
            .unwrap_or_default()
    }

    fn text_at(&self, path: &[&str]) -> String {
        self.tree
            .find_path(self.root, path)
            .and_then(|id| self.tree.get(id))
            .and_then(Node::scalar)
            .unwrap_or_default()
            .to_owned()
    }
}

fn texts(id_short: &str, semantic_uri: &str, value: &[LangString]) -> Node {
    Node::multi_language(id_short, value.to_vec()).with_semantic_id(Reference::external(semantic_uri))
}

fn variable(id_short: &str, semantic_uri: &str, value: &str) -> Node {
    Node::string_property(id_short, value)
        .with_semantic_id(Reference::external(semantic_uri))
        .with_category(VARIABLE)
}

fn append_address(tree: &mut Tree, root: NodeId, address: &AddressData) {
    let Some(collection) = tree.append(
        root,
        Node::collection(ADDRESS_INFORMATION)
            .with_category(VARIABLE)
            .with_semantic_id(Reference::external(NAMEPLATE_ADDRESS_INFORMATION)),
    ) else {
        return;
    };

    tree.append(collection, texts(STREET, NAMEPLATE_STREET, &address.street).with_category(PARAMETER));
    for (id_short, semantic_uri, value) in [
        (ZIPCODE, NAMEPLATE_ZIPCODE, &address.zipcode),
        (CITY_TOWN, NAMEPLATE_CITY_TOWN, &address.city_town),
        (STATE_COUNTY, NAMEPLATE_STATE_COUNTY, &address.state_county),
        (NATIONAL_CODE, NAMEPLATE_NATIONAL_CODE, &address.national_code),
    ] {
        tree.append(collection, texts(id_short, semantic_uri, value).with_category(VARIABLE));
    }

    if let Some(phone) = tree.append(
        collection,
        Node::collection(PHONE).with_category(VARIABLE).with_semantic_id(Reference::external(NAMEPLATE_PHONE)),
    ) {
        tree.append(
            phone,
            texts(TELEPHONE_NUMBER, NAMEPLATE_TELEPHONE_NUMBER, &address.phone.number).with_category(VARIABLE),
        );
        tree.append(phone, variable(TYPE_OF_TELEPHONE, NAMEPLATE_TYPE_OF_TELEPHONE, &address.phone.type_of_telephone));
    }

    if let Some(email) = tree.append(
        collection,
        Node::collection(EMAIL).with_category(VARIABLE).with_semantic_id(Reference::external(NAMEPLATE_EMAIL)),
    ) {
        tree.append(email, variable(EMAIL_ADDRESS, NAMEPLATE_EMAIL_ADDRESS, &address.email.address));
        tree.append(
            email,
            variable(TYPE_OF_EMAIL_ADDRESS, NAMEPLATE_TYPE_OF_EMAIL_ADDRESS, &address.email.type_of_email_address),
        );
    }
}

/// A fluent builder for a [`Nameplate`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct NameplateBuilder {
    identifier: Option<String>,
    prefix: Option<String>,
    data: Option<NameplateData>,
}

impl NameplateBuilder {
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

    /// Values applied right after the submodel is created.
    pub fn data(mut self, data: NameplateData) -> Self {
        self.data = Some(data);
        self
    }

    pub fn build(self) -> Nameplate {
        let identifier = self.identifier.unwrap_or_else(|| {
            let prefix = self.prefix.unwrap_or_else(|| RepositoryConfig::default().submodel_prefix);
            submodel_identifier(&prefix)
        });

        let mut tree = Tree::new();
        let root = tree.insert(
            Node::submodel(NAMEPLATE_ID, identifier.as_str(), ModelingKind::Instance)
                .with_semantic_id(Reference::external(NAMEPLATE)),
        );
        let mut nameplate = Nameplate { tree, root };
        if let Some(data) = &self.data {
            nameplate.apply(data);
        }

        info!(%identifier, "nameplate created");
        nameplate
    }
}
