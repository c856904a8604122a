pub mod pointcloud;

pub use pointcloud::map::PointCloudMap;
pub use pointcloud::point::{Point3D, PointTable, Vector3f};
pub use pointcloud::reference::{Reference, ReferenceId, ReferenceTable};

/// Version written to the `# Version` header of encoded maps.
pub const FORMAT_VERSION: &str = env!("CARGO_PKG_VERSION");
