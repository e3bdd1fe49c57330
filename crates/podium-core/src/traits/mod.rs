pub mod meta_model;
pub mod model_adapter;

pub use meta_model::IMetaModel;
pub use model_adapter::IModelAdapter;
