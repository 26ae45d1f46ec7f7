//! Build a SYN segment, dump its bytes, then parse and validate it again.
//!
//! Run with: cargo run --example segment_dump

use std::net::Ipv4Addr;

use tcp_wire::{TcpFlags, TcpHeader, TcpOption, TcpSegment};

fn main() -> Result<(), tcp_wire::Error> {
    let src = Ipv4Addr::new(192, 168, 1, 10);
    let dst = Ipv4Addr::new(192, 168, 1, 1);

    let syn = TcpHeader {
        seq_number: 0x1234_5678,
        flags: TcpFlags::SYN,
        window_size: 64240,
        options: vec![
            TcpOption::MaximumSegmentSize(1460),
            TcpOption::NoOperation,
            TcpOption::NoOperation,
            TcpOption::Unknown { kind: 4, data: vec![] },
        ],
        ..TcpHeader::new(51000, 80)
    };

    let bytes = syn.to_segment(src, dst, &[])?;
    println!("{}:{} -> {}:{} ({} bytes)", src, syn.src_port, dst, syn.dst_port, bytes.len());
    for row in bytes.chunks(4) {
        let words: Vec<String> = row.iter().map(|b| format!("{:02x}", b)).collect();
        println!("  {}", words.join(" "));
    }

    let segment = TcpSegment::parse(&bytes)?;
    println!("flags: {:?}", segment.header.flags);
    println!("mss: {:?}", segment.header.mss());
    println!("options: {:?}", segment.header.options);
    println!("checksum: {:#06x}", segment.header.checksum);

    match segment.verify_checksum(src, dst) {
        Ok(()) => println!("checksum valid"),
        Err(err) => println!("checksum invalid: {}", err),
    }

    Ok(())
}
