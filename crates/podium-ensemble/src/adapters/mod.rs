//! Rule-based and replay implementations of [`IModelAdapter`](podium_core::traits::IModelAdapter).

pub mod static_adapter;
pub mod weighted_feature;

pub use static_adapter::StaticAdapter;
pub use weighted_feature::WeightedFeatureAdapter;
