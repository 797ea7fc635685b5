//! Semantic identifiers of the submodels built by the feature crates.
//!
//! Every constant is a global reference URI or an ECLASS IRDI. The catalog is
//! opaque to the tree and serializer; only the feature crates resolve these.

macro_rules! semantic {
    ($name:ident, $path:literal) => {
        pub const $name: &str = concat!("https://smartfactory.de/semantics/submodel-element", $path);
    };
}

/// Model reference keys (`Submodel` typed) of the production plan submodel.
pub const PRODUCTION_PLAN_KEYS: [&str; 3] = [
    "ProductionPlan",
    "ProductionSchedule",
    "https://smartfactory.de/semantics/submodel/ProductionPlan#1/0",
];

semantic!(STEP, "/Step");
semantic!(STEP_TITLE, "/Step/StepTitle");
semantic!(STEP_STATUS, "/Step/Status");
semantic!(STEP_ACTIONS, "/Step/Actions");
semantic!(STEP_ACTION, "/Step/Actions/Action");
semantic!(STEP_STATION, "/Step/Station");
semantic!(STEP_INITIAL_STATE, "/Step/InitialState");
semantic!(STEP_FINAL_STATE, "/Step/FinalState");
semantic!(STEP_SCHEDULING, "/Step/Scheduling");
semantic!(STEP_ENTERPRISE, "/Step/Enterprise");
semantic!(STEP_WORKCENTRE, "/Step/Workcentre");

semantic!(SCHEDULING_START_DATE_TIME, "/Scheduling/StartDateTime");
semantic!(SCHEDULING_END_DATE_TIME, "/Scheduling/EndTime");
semantic!(SCHEDULING_SETUP_TIME, "/Scheduling/SetupTime");
semantic!(SCHEDULING_CYCLE_TIME, "/Scheduling/CycleTime");

semantic!(ACTION_TITLE, "/Step/Actions/Action/ActionTitle");
semantic!(ACTION_STATUS, "/Step/Actions/Action/Status");
semantic!(ACTION_INPUT_PARAMETERS, "/Step/Actions/Action/InputParameters");
semantic!(ACTION_FINAL_RESULT_DATA, "/Step/Actions/Action/FinalResultData");
semantic!(ACTION_FINAL_RESULT_END_TIME, "/Step/Actions/Action/FinalResultData/EndTime");
semantic!(ACTION_FINAL_RESULT_START_TIME, "/Step/Actions/Action/FinalResultData/StartTime");
semantic!(ACTION_PRECONDITIONS, "/Step/Actions/Action/Preconditions");
semantic!(ACTION_SKILL_REFERENCE, "/Step/Actions/Action/SkillReference");
// Upstream catalog spells it this way; consumers match on the exact URI.
semantic!(ACTION_EFFECTS, "/Step/Actions/Action/Effecs");
semantic!(ACTION_MACHINE_NAME, "/Step/Actions/Action/MachineName");

pub const MACHINE_SCHEDULE: &str = "https://smartfactory.de/semantics/submodel/MachineSchedule#1/0";
semantic!(MACHINE_SCHEDULE_LAST_TIME_UPDATED, "/MachineSchedule/LastTimeUpdated#1/0");
semantic!(MACHINE_SCHEDULE_HAS_OPEN_TASKS, "/MachineSchedule/HasOpenTasks#1/0");
semantic!(MACHINE_SCHEDULE_SCHEDULE, "/MachineSchedule/Schedule#1/0");

pub const NAMEPLATE: &str = "https://smartfactory.de/semantics/submodel/Island/Nameplate/#3/0";
pub const NAMEPLATE_URI_OF_THE_MANUFACTURER: &str = "https://smartfactory.de/Productionsinsel_KUBA";
pub const NAMEPLATE_MANUFACTURER_NAME: &str = "0173-1#02-AAO677#002";
pub const NAMEPLATE_MANUFACTURER_PRODUCT_DESIGNATION: &str = "0112/2///61987#ABA567#009";
pub const NAMEPLATE_MANUFACTURER_PRODUCT_DESIGNATION_SUPPLEMENT: &str = "0173-1#02-AAW338#003";
pub const NAMEPLATE_ADDRESS_INFORMATION: &str = "0173-1#02-AAQ832#005";
pub const NAMEPLATE_STREET: &str = "0173-1#02-AAO128#002";
pub const NAMEPLATE_ZIPCODE: &str = "0173-1#02-AAO129#002";
pub const NAMEPLATE_CITY_TOWN: &str = "0173-1#02-AAO132#002";
pub const NAMEPLATE_STATE_COUNTY: &str = "0173-1#02-AAO133#002";
pub const NAMEPLATE_NATIONAL_CODE: &str = "0173-1#02-AAO134#002";
pub const NAMEPLATE_PHONE: &str = "0173-1#02-AAQ833#005";
pub const NAMEPLATE_TELEPHONE_NUMBER: &str = "0173-1#02-AAO136#002";
pub const NAMEPLATE_TYPE_OF_TELEPHONE: &str = "0173-1#02-AAO137#003";
pub const NAMEPLATE_EMAIL: &str = "0173-1#02-AAQ836#005";
pub const NAMEPLATE_EMAIL_ADDRESS: &str = "0173-1#02-AAO198#002";
pub const NAMEPLATE_TYPE_OF_EMAIL_ADDRESS: &str = "0173-1#02-AAO199#003";
pub const NAMEPLATE_ORDER_CODE_OF_MANUFACTURER: &str = "0112/2///61987#ABA950#008";
pub const NAMEPLATE_ORDER_CODE_OF_MANUFACTURER_SUPPLEMENT: &str = "0173-1#02-AAO227#004";

macro_rules! capability {
    ($name:ident, $path:literal) => {
        pub const $name: &str =
            concat!("https://admin-shell.io/idta/CapabilityDescription/", $path, "/1/0");
    };
}

pub const CAPABILITY_DESCRIPTION: &str = "https://admin-shell.io/idta/CapabilityDescription/1/0/Submodel";
capability!(CAPABILITY_SET, "CapabilitySet");
capability!(CAPABILITY_CONTAINER, "CapabilityContainer");
capability!(CAPABILITY_RELATIONS, "CapabilityRelations");
capability!(CAPABILITY_PROPERTY_SET, "PropertySet");
capability!(CAPABILITY_PROPERTY_CONTAINER, "PropertyContainer");
capability!(CAPABILITY_CONSTRAINT_SET, "ConstraintSet");
capability!(CAPABILITY_PROPERTY_CONSTRAINT_CONTAINER, "PropertyConstraintContainer");
capability!(CAPABILITY_CUSTOM_CONSTRAINT, "CustomConstraint");
pub const CAPABILITY: &str =
    "https://wiki.eclipse.org/BaSyx_/_Documentation_/_Submodels_/_Capability#Capability";
