pub mod toddler_social;
