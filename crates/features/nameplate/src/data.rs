use twin_model::LangString;
use typed_builder::TypedBuilder;

/// Everything written into a nameplate submodel.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct NameplateData {
    /// Description of the submodel itself.
    #[builder(default)]
    pub description: Vec<LangString>,
    #[builder(setter(into))]
    pub manufacturer_uri: String,
    #[builder(default)]
    pub manufacturer_uri_description: Vec<LangString>,
    pub manufacturer_name: Vec<LangString>,
    #[builder(default)]
    pub manufacturer_product_designation: Vec<LangString>,
    #[builder(default)]
    pub address: AddressData,
    #[builder(default, setter(into))]
    pub order_code_of_manufacturer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, TypedBuilder)]
pub struct AddressData {
    #[builder(default)]
    pub street: Vec<LangString>,
    #[builder(default)]
    pub zipcode: Vec<LangString>,
    #[builder(default)]
    pub city_town: Vec<LangString>,
    #[builder(default)]
    pub state_county: Vec<LangString>,
    #[builder(default)]
    pub national_code: Vec<LangString>,
    #[builder(default)]
    pub phone: PhoneData,
    #[builder(default)]
    pub email: EmailData,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneData {
    pub number: Vec<LangString>,
    pub type_of_telephone: String,
}

impl PhoneData {
    pub fn new(number: Vec<LangString>, type_of_telephone: impl Into<String>) -> Self {
        Self { number, type_of_telephone: type_of_telephone.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailData {
    pub address: String,
    pub type_of_email_address: String,
}

impl EmailData {
    pub fn new(address: impl Into<String>, type_of_email_address: impl Into<String>) -> Self {
        Self { address: address.into(), type_of_email_address: type_of_email_address.into() }
    }
}
