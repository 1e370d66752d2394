criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        computing_emd_small_events,
        computing_emd_large_events,
        computing_emd_unbalanced_events,
        solving_transport_network,
        computing_pairwise_symmetric,
        computing_pairwise_streaming,
}

use std::sync::Arc;
use wasserstein::*;

type Event2 = VectorEvent<Euclidean2>;

fn engine(params: Params) -> Emd<EuclideanDistance2> {
    Emd::from((params, EuclideanDistance2::default()))
}

fn computing_emd_small_events(c: &mut criterion::Criterion) {
    let a = Event2::random(25);
    let b = Event2::random(25);
    let ref mut emd = engine(Params::from((0.4, 1., true)));
    c.bench_function("compute EMD between 25-particle events", |bench| {
        bench.iter(|| emd.compute(&a, &b))
    });
}

fn computing_emd_large_events(c: &mut criterion::Criterion) {
    let a = Event2::random(150);
    let b = Event2::random(150);
    let ref mut emd = engine(Params::from((0.4, 1., true)));
    c.bench_function("compute EMD between 150-particle events", |bench| {
        bench.iter(|| emd.compute(&a, &b))
    });
}

fn computing_emd_unbalanced_events(c: &mut criterion::Criterion) {
    let a = Event2::random(40);
    let b = Event2::random(60);
    let ref mut emd = engine(Params {
        extra: ExtraParticle::One,
        ..Params::default()
    });
    c.bench_function("compute EMD with an extra particle", |bench| {
        bench.iter(|| emd.compute(&a, &b))
    });
}

fn solving_transport_network(c: &mut criterion::Criterion) {
    let a = Event2::random(50);
    let b = Event2::random(50);
    let mut problem = Problem::default();
    problem
        .build(&Params::from((1., 1., true)), &EuclideanDistance2::default(), &a, &b)
        .expect("balanced events");
    let limits = Limits::default();
    let ref mut solver = NetworkSimplex::default();
    c.bench_function("solve a 50x50 transport network", |bench| {
        bench.iter(|| solver.solve(problem.network(), &limits))
    });
}

fn computing_pairwise_symmetric(c: &mut criterion::Criterion) {
    let events = (0..48).map(|_| Event2::random(20)).collect::<Vec<_>>();
    let ref mut pairwise = PairwiseEmd::<EuclideanDistance2, Event2>::from((
        Params::from((0.4, 1., true)),
        EuclideanDistance2::default(),
    ));
    c.bench_function("compute 1128 pairwise EMDs", |bench| {
        bench.iter(|| pairwise.compute(&events, None))
    });
}

fn computing_pairwise_streaming(c: &mut criterion::Criterion) {
    let events = (0..48).map(|_| Event2::random(20)).collect::<Vec<_>>();
    let ref mut pairwise = PairwiseEmd::<EuclideanDistance2, Event2>::from((
        Params::from((0.4, 1., true)),
        EuclideanDistance2::default(),
    ));
    pairwise.handle(Arc::new(
        CorrelationDimension::new(32, 1e-3, 10.).expect("valid binning"),
    ));
    c.bench_function("stream 1128 pairwise EMDs into a histogram", |bench| {
        bench.iter(|| pairwise.compute(&events, None))
    });
}
