/*!
 * Memsim Shell - Main Entry Point
 *
 * Demonstration driver that exercises the allocator: a few writes, a
 * release in the middle, a burst of alloc/free churn to fragment the
 * store, then compaction, with hexdumps and segment-table dumps at each
 * checkpoint.
 */

use std::error::Error;
use tracing::info;

use memsim::core::limits::{CAPACITY_ENV, DEFAULT_CAPACITY};
use memsim::{hexdump, init_tracing, render_segment_table};
use memsim::{Compactor, MemoryInfo, MemoryManager};

fn main() -> Result<(), Box<dyn Error>> {
    // Structured tracing for the shell, env_logger for the library's log
    // records (both honor RUST_LOG)
    init_tracing();
    let _ = env_logger::try_init();

    info!("Memsim shell starting...");
    info!("================================================");

    let capacity = match std::env::var(CAPACITY_ENV) {
        Ok(raw) => raw.parse()?,
        Err(_) => DEFAULT_CAPACITY,
    };
    info!(capacity, "Initializing memory manager");
    let mut memory = MemoryManager::with_capacity(capacity);

    // Three allocations, each written with a test string
    let mut handles = Vec::new();
    for _ in 0..3 {
        let handle = memory.allocate(10)?;
        memory.write_bytes(handle, b"this test")?;
        let content = memory.read_bytes(handle.address(), 9)?;
        println!(
            "shell> content of allocated memory at {}: {}",
            handle,
            String::from_utf8_lossy(content)
        );
        handles.push(handle);
    }

    println!("{}", hexdump(memory.as_bytes()));
    println!("{}", render_segment_table(&memory));

    // Free the middle allocation
    memory.release(handles[1])?;

    // Churn: four more allocations, all released, leaving the free space
    // scattered across the chain
    let churn: Vec<_> = (0..4)
        .map(|_| memory.allocate(10))
        .collect::<Result<_, _>>()?;
    for handle in churn {
        memory.release(handle)?;
    }

    info!(
        segments = memory.segment_count(),
        fragmented = memory.is_fragmented(),
        "Store fragmented before compaction"
    );
    println!("{}", render_segment_table(&memory));

    memory.compact();

    println!("{}", hexdump(memory.as_bytes()));
    println!("{}", render_segment_table(&memory));

    let stats = memory.stats();
    println!("shell> stats: {}", serde_json::to_string(&stats)?);

    info!("Memsim shell done");
    Ok(())
}
