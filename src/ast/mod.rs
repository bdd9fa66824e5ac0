/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Node kinds, node tags and the per-node semantic slot
/// - visitor: Dispatch / traverse-inner protocol used by the passes
/// - printer: Source and type-annotated printing
pub mod ast;
pub mod printer;
pub mod visitor;

#[cfg(test)]
mod tests;
