mod cleanup;
mod declarations;
mod mutant;

pub use cleanup::strip_tag_residue;
pub use declarations::insert_declarations;
pub use mutant::{synthesize_mutant, MutantOptions, MutantText};
