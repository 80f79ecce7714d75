pub(crate) mod bitmap;
pub(crate) mod composite;
pub(crate) mod overlay;
pub(crate) mod pipeline;
pub(crate) mod raster;
