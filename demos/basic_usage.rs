use chaintable::config::Config;
use chaintable::{Hashtable, HashtableConfig, Result};

fn main() -> Result<()> {
    chaintable::init();
    println!("=== chaintable demo ===\n");

    println!("1. Basic operations:");
    let mut table = Hashtable::new();
    table.put("apple".to_string(), 3);
    table.put("pear".to_string(), 5);
    let previous = table.put("apple".to_string(), 4);
    println!("   apple overwritten, previous value: {:?}", previous);
    println!("   apple -> {:?}", table.get("apple"));
    println!("   plum  -> {:?}", table.get("plum"));
    println!("   removing plum: {:?}", table.remove("plum"));
    println!("   len = {}, buckets = {}", table.len(), table.bucket_size());

    println!("\n2. Growth:");
    let mut table = Hashtable::with_capacity(5)?;
    let mut last_capacity = table.bucket_size();
    for i in 0..100u32 {
        table.put(i, i * i);
        if table.bucket_size() != last_capacity {
            println!(
                "   inserting key {} grew {} -> {} slots",
                i,
                last_capacity,
                table.bucket_size()
            );
            last_capacity = table.bucket_size();
        }
    }
    println!("   load factor now {:.3}", table.load_factor());

    println!("\n3. Chains and statistics:");
    let stats = table.stats();
    println!(
        "   {} entries over {} occupied slots, longest chain {}",
        stats.len, stats.occupied_slots, stats.longest_chain
    );
    let slot = table.slot_of(&7u32);
    let chain: Vec<_> = table.chain(slot).map(|(k, _)| *k).collect();
    println!("   slot {} holds keys {:?}", slot, chain);

    println!("\n4. Configuration:");
    let config = HashtableConfig::from_env()?;
    println!("   from environment: {:?}", config);
    let tuned: Hashtable<u64, u64> = Hashtable::with_config(HashtableConfig::performance_preset())?;
    println!(
        "   performance preset: {} slots, load limit {}",
        tuned.bucket_size(),
        tuned.load_limit()
    );

    Ok(())
}
