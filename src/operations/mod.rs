pub mod skeleton;

pub use skeleton::{
    skeletonize, skeletonize_contour, SkeletonOptions, Skeletonize, StraightSkeleton, Subtree,
};
