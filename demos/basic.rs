//! Basic usage example of the Child-Sum Tree-LSTM
//!
//! This example encodes a few trees and shows the shapes of the per-node and
//! root outputs. Run with `RUST_LOG=debug` to see the walker's log lines.

use burn::backend::NdArray;
use burn::tensor::Tensor;
use treelstm::prelude::*;

fn main() -> treelstm::Result<()> {
    env_logger::init();
    println!("=== Child-Sum Tree-LSTM Basic Example ===\n");

    // Use the NdArray backend (CPU)
    type Backend = NdArray<f32>;
    let device = Default::default();

    let layer = ChildSumTreeLSTMConfig::new(16, 32).init::<Backend>(&device);
    println!("Created Child-Sum Tree-LSTM:");
    println!("  in_dim:  {}", layer.in_dim());
    println!("  mem_dim: {}", layer.mem_dim());
    println!();

    // Example 1: Tree built node by node
    println!("Example 1: Builder API");
    let mut tree = Tree::new(0);
    let root = tree.root();
    let np = tree.add_child(root, 1)?;
    tree.add_child(root, 2)?;
    tree.add_child(np, 3)?;
    tree.add_child(np, 4)?;

    let inputs = Tensor::<Backend, 2>::random(
        [5, 16],
        burn::tensor::Distribution::Uniform(-1.0, 1.0),
        &device,
    );
    let output = layer.forward(&tree, inputs)?;

    println!("  Nodes: {}, depth: {}", tree.len(), tree.depth());
    println!("  Root hidden shape: {:?}", output.root_hidden.dims());
    println!("  All hiddens shape: {:?}", output.hiddens.dims());
    println!();

    // Example 2: Dependency parse given as parent pointers
    println!("Example 2: Parent pointers");
    // "the quick fox jumped": the, quick -> fox -> jumped (root)
    let parse = Tree::from_parents(&[3, 3, 4, 0])?;
    let embeddings = Tensor::<Backend, 2>::random(
        [4, 16],
        burn::tensor::Distribution::Uniform(-1.0, 1.0),
        &device,
    );
    let output = layer.forward(&parse, embeddings)?;

    println!("  Root is token {}", parse.idx(parse.root()));
    println!("  Output order (pre-order): {:?}", parse.data());
    println!("  All hiddens shape: {:?}", output.hiddens.dims());
    println!();

    // Example 3: Errors are returned, not masked
    println!("Example 3: Out-of-range input row");
    let too_few_rows = Tensor::<Backend, 2>::zeros([2, 16], &device);
    match layer.forward(&parse, too_few_rows) {
        Ok(_) => println!("  unexpected success"),
        Err(e) => println!("  error: {}", e),
    }
    println!();

    println!("=== Examples completed successfully! ===");
    Ok(())
}
