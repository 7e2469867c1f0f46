pub mod error;
pub mod export;
pub mod field;
pub mod model;
pub mod populator;
pub mod value;

pub use error::PopulatorError;
pub use model::{
    attribute_from_model, AttributeModel, CustomSerializable, KeyedGet, KeyedGroup, MapConvertible,
    Model, ReflectableStruct, Reflected,
};
pub use populator::Populator;
pub use value::Value;
