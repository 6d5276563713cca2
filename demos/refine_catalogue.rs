//! Refine every catalogue grammar with its preset schedule

use markov_sequence::prelude::*;
use markov_sequence::utils::{timing::Timer, to_json};

fn main() -> Result<()> {
    simple_logger::init_with_level(log::Level::Info).ok();

    println!("=== Markov sequences ===\n");

    for grammar in catalogue::all()? {
        let law = grammar.scaling_law()?;
        let config = SequenceConfig::preset(grammar.name())
            .unwrap_or_else(|| SequenceConfig::geometric(3, 0.4, Point2::new(1.0, 0.0), Point2::new(0.0, 1.0)))
            .truncated(4);

        println!("--- {} ---", grammar.name());
        println!(
            "|V'| = {}|V| + {}|E|, |E'| = {}|V| + {}|E|",
            law.vertex_terms.0, law.vertex_terms.1, law.edge_terms.0, law.edge_terms.1
        );

        let mut sequence = MarkovSequence::new(&grammar);
        {
            let _timer = Timer::new(grammar.name());
            sequence.run(&config)?;
        }

        for (level, (v, e)) in sequence.counts().into_iter().enumerate() {
            println!("  level {}: {:>6} vertices {:>7} edges", level, v, e);
        }

        if let Some((lo, hi)) = sequence.last().snapshot().bounding_box() {
            println!("  extent: {:?} .. {:?}", lo, hi);
        }
        println!();
    }

    // Export the first refinement of the diamond for an external renderer
    let diamond = catalogue::diamond()?;
    let mut sequence = MarkovSequence::new(&diamond);
    sequence.run(&SequenceConfig::diamond().truncated(1))?;
    println!("{}", to_json(&sequence.last().snapshot())?);

    Ok(())
}
