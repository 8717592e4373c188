use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use diode_pic::discretization::grid::{AppliedField, Grid};
use diode_pic::numerics::tridiag::TriDiagonalMatrix;
use diode_pic::physics::deposition::ChargeDepositor;
use diode_pic::physics::particle::{Particle, ParticleSet};
use diode_pic::physics::poisson::FieldSolver;
use diode_pic::{DiodeParams, ParticleInCell, WeightingScheme};
use nalgebra::DVector;

fn grid_sizes() -> Vec<usize> {
    vec![101, 1001]
}

fn particle_counts() -> Vec<usize> {
    vec![1_000, 10_000]
}

fn diode_grid(n: usize) -> Grid {
    Grid::uniform(
        0.01,
        n,
        AppliedField::Linear {
            voltage: 1000.0,
            length: 0.01,
        },
    )
}

fn spread_particles(count: usize, length: f64) -> ParticleSet {
    let mut set = ParticleSet::with_capacity(count);
    for k in 0..count {
        let mut p = Particle::at_cathode(0.0, -1e-10);
        p.x = ((k as f64 * 0.618_033_988_75) % 1.0) * length;
        set.push(p);
    }
    set
}

fn bench_thomas_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("thomas_solve");
    for &n in &grid_sizes() {
        let m = TriDiagonalMatrix::poisson_dirichlet(n, 0.01 / (n - 1) as f64);
        let mut rhs = DVector::from_element(n, -1.0);
        rhs[0] = 0.0;
        rhs[n - 1] = 1000.0;
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &_| {
            b.iter(|| {
                let phi = m.solve(std::hint::black_box(&rhs));
                std::hint::black_box(phi);
            });
        });
    }
    group.finish();
}

fn bench_field_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_solve");
    for &n in &grid_sizes() {
        let mut grid = diode_grid(n);
        let mut set = spread_particles(1_000, grid.length());
        ChargeDepositor::new(WeightingScheme::LinearTwoNode)
            .deposit(&mut grid, &mut set)
            .unwrap();
        let mut solver = FieldSolver::new(&grid);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &_| {
            b.iter(|| solver.solve(&mut grid).unwrap());
        });
    }
    group.finish();
}

fn bench_deposition(c: &mut Criterion) {
    for scheme in [WeightingScheme::NearestNode, WeightingScheme::LinearTwoNode] {
        let mut group = c.benchmark_group(format!("deposition_{:?}", scheme));
        let depositor = ChargeDepositor::new(scheme);
        for &count in &particle_counts() {
            let mut grid = diode_grid(101);
            let set = spread_particles(count, grid.length());
            group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &_| {
                b.iter_batched(
                    || set.clone(),
                    |mut particles| depositor.deposit(&mut grid, &mut particles).unwrap(),
                    BatchSize::SmallInput,
                );
            });
        }
        group.finish();
    }
}

fn bench_full_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_step");
    for &warmup in &[1_000u64, 10_000] {
        // Keep injecting for the whole benchmark.
        let params = DiodeParams {
            t_imp: 1.0,
            progress_interval: 0,
            ..Default::default()
        };
        let mut pic = ParticleInCell::new(params).unwrap();
        for _ in 0..warmup {
            pic.step().unwrap();
        }
        group.bench_with_input(BenchmarkId::from_parameter(warmup), &warmup, |b, &_| {
            b.iter(|| std::hint::black_box(pic.step().unwrap()));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_thomas_solve,
    bench_field_solve,
    bench_deposition,
    bench_full_step
);
criterion_main!(benches);
