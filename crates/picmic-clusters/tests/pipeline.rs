use picmic_clusters::{
    decode_lines, encode_lines, ClusterParams, ClusterPipeline, DuplicateHits, EventReport,
    Overflow,
};
use picmic_core::{Hit, LineLabel, LookupTable, Orientation};

const STRIPS: usize = 852;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One row per orientation, addressed by packet strip number.
fn strip_table() -> LookupTable {
    let mut table = LookupTable::new(3, STRIPS);
    for (row, o) in Orientation::ALL.into_iter().enumerate() {
        for col in 0..STRIPS {
            let label = LineLabel::Line {
                orientation: o,
                strip: col as i32 - o.offset() - base(o),
            };
            table.set(Hit::new(row, col), label).expect("inside table");
        }
    }
    table
}

fn base(o: Orientation) -> i32 {
    if o == Orientation::R {
        427
    } else {
        0
    }
}

fn hit(o: Orientation, v: i32) -> Hit {
    let row = Orientation::ALL.iter().position(|&x| x == o).unwrap_or(0);
    Hit::new(row, (v + base(o)) as usize)
}

fn run(params: ClusterParams, hits: &[Hit]) -> EventReport {
    init_logger();
    ClusterPipeline::new(params)
        .expect("valid params")
        .process(&strip_table(), hits)
        .expect("known cells")
}

#[test]
fn centre_crossing_gives_one_point_cluster() {
    use Orientation::*;
    let report = run(ClusterParams::default(), &[hit(Y, 424), hit(B, 424), hit(R, 0)]);

    assert_eq!(report.clusters.len(), 1);
    let cluster = &report.clusters.clusters[0];
    assert_eq!(cluster.kind.bits(), 7);
    assert_eq!(cluster.edges.len(), 6);
    assert!(cluster
        .edges
        .iter()
        .all(|e| e.coords() == [424, 424, 424, 424]));
    assert_eq!(
        report.clusters.to_string(),
        "EventClusters([\n([((424, 424), (424, 424)), ((424, 424), (424, 424)), \
         ((424, 424), (424, 424)), ((424, 424), (424, 424)), ((424, 424), (424, 424)), \
         ((424, 424), (424, 424))], type=7)])"
    );
}

#[test]
fn two_separate_tracks_give_two_clusters() {
    use Orientation::*;
    let hits = [
        hit(R, 100),
        hit(Y, 600),
        hit(B, 50),
        hit(Y, 100),
        hit(B, 500),
        hit(R, 50),
    ];
    let report = run(ClusterParams::default(), &hits);

    assert_eq!(report.fat_lines.len(), 6);
    let kinds: Vec<u8> = report.clusters.iter().map(|c| c.kind.bits()).collect();
    assert_eq!(kinds, vec![7, 7]);
    assert_eq!(report.clusters.clusters[0].edges[0].coords(), [50, 100, 50, 100]);
    assert_eq!(report.clusters.clusters[1].edges[0].coords(), [500, 600, 500, 600]);
}

#[test]
fn missing_orientation_falls_back_to_pairs() {
    use Orientation::*;
    let hits: Vec<Hit> = (200..225)
        .map(|v| hit(Y, v))
        .chain((-100..-75).map(|v| hit(R, v)))
        .collect();
    let report = run(ClusterParams::default(), &hits);

    assert!(report.lines.blines.is_empty());
    assert!(report.fat_lines.bfat.is_empty());
    assert_eq!(report.clusters.len(), 1);
    let cluster = &report.clusters.clusters[0];
    assert_eq!(cluster.kind.bits(), 5);
    let edges: Vec<[i32; 4]> = cluster.edges.iter().map(|e| e.coords()).collect();
    assert_eq!(
        edges,
        vec![
            [276, 200, 300, 200],
            [300, 224, 324, 224],
            [300, 200, 324, 224],
            [276, 200, 300, 224],
        ]
    );
}

#[test]
fn repeated_readout_is_filtered_on_request() {
    use Orientation::*;
    let hits = [hit(Y, 10), hit(Y, 10), hit(B, 4)];

    let kept = run(ClusterParams::default(), &hits);
    assert_eq!(&kept.lines.ylines[..], &[10, 10]);

    let params = ClusterParams {
        duplicate_hits: DuplicateHits::SkipRepeated,
        ..ClusterParams::default()
    };
    let filtered = run(params, &hits);
    assert_eq!(&filtered.lines.ylines[..], &[10]);
    assert_eq!(filtered.repeated_hits, 1);
}

#[test]
fn oversized_event_is_truncated_not_rejected() {
    let hits: Vec<Hit> = (0..300).map(|v| hit(Orientation::Y, v)).collect();
    let report = run(ClusterParams::default(), &hits);

    assert!(report.is_truncated());
    assert_eq!(
        report.overflows,
        vec![Overflow::Hits {
            capacity: 256,
            dropped: 44
        }]
    );
    assert_eq!(report.lines.ylines.len(), 256);
    assert_eq!(report.fat_lines.yfat.len(), 1);
    assert!(report.clusters.is_empty());
}

#[test]
fn reconstructed_lines_survive_packet_encoding() {
    use Orientation::*;
    let hits = [hit(B, 3), hit(Y, 851), hit(R, -427), hit(R, 424), hit(Y, 0)];
    let report = run(ClusterParams::default(), &hits);

    let words = encode_lines(&report.lines).expect("lines inside the sensor");
    let decoded = decode_lines(&words).expect("well-formed packets");
    for o in Orientation::ALL {
        assert_eq!(decoded.get(o), &report.lines.get(o)[..]);
    }
}
