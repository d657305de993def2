use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use foxfs::codec::{self, SCHEMA_INODE};
use foxfs::prelude::*;
use foxio::prelude::*;

criterion_group!(benches, codec_bench, volume_bench);
criterion_main!(benches);

fn sample_inode() -> FoxInode {
    let mut inode = FoxInode::new(FileType::Regular, 0o644);
    inode.uid = 1000;
    inode.gid = 1000;
    inode.size = 13 * 4096;
    for (i, block) in (100..=112).enumerate() {
        inode.set_block_pointer(i, block);
    }
    inode
}

pub fn codec_bench(c: &mut Criterion) {
    let widths = FieldWidths::default();
    let inode = sample_inode();
    let fields = inode.to_fields();
    let bytes = codec::encode(&fields, SCHEMA_INODE, &widths).expect("encode failed");

    c.bench_function("inode_encode", |b| {
        b.iter(|| codec::encode(black_box(&fields), SCHEMA_INODE, &widths).expect("encode failed"));
    });

    c.bench_function("inode_decode", |b| {
        b.iter(|| codec::decode(black_box(&bytes), 0, SCHEMA_INODE, &widths).expect("decode failed"));
    });

    let mut listing = Vec::new();
    for i in 0..128u64 {
        FoxDirEntry::new(format!("file_{i:03}.txt").as_bytes(), i + 11)
            .encode_into(&widths, &mut listing)
            .expect("encode failed");
    }

    c.bench_function("dirent_walk_128", |b| {
        b.iter(|| DirEntryIter::new(black_box(&listing), &widths).count());
    });
}

pub fn volume_bench(c: &mut Criterion) {
    const SIZE_BYTES: u64 = 1024 * 1024;
    let meta = FoxMeta::new(SIZE_BYTES);
    let mut buf = vec![0u8; SIZE_BYTES as usize];
    let mut mem_io = MemFoxIO::new(&mut buf);
    FoxFormatter::new(&mut mem_io, &meta)
        .format(false)
        .expect("format failed");

    let inode = sample_inode();
    c.bench_function("inode_read_mem", |b| {
        b.iter(|| {
            let mut vol = FoxVolume::open_read_only(&mut mem_io).expect("open failed");
            let _ = vol.read_inode(black_box(8192)).expect("read failed");
        });
    });

    let mut vol = FoxVolume::mount(&mut mem_io).expect("mount failed");
    c.bench_function("inode_write_mem", |b| {
        b.iter(|| vol.write_inode(8192, black_box(&inode)).expect("write failed"));
    });
}
