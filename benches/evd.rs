use criterion::*;
use dyn_stack::{GlobalPodBuffer, PodStack};
use faer_sevd::{
    linalg::{
        evd::{
            self_adjoint_evd, self_adjoint_evd_req,
            tridiag::{tridiagonalize_in_place, tridiagonalize_in_place_req},
            tridiag_evd::{compute_tridiag_evd, default_max_iter},
            ComputeVectors,
        },
        gevd::{self_adjoint_gevd, self_adjoint_gevd_req},
    },
    Mat, Parallelism, RealField,
};
use rand::prelude::*;
use std::any::type_name;

fn random<E: RealField>(rng: &mut StdRng) -> E {
    E::faer_from_f64(rng.gen::<f64>())
}

fn random_symmetric<E: RealField>(rng: &mut StdRng, n: usize) -> Mat<E> {
    let mat = Mat::from_fn(n, n, |_, _| random::<E>(rng));
    Mat::from_fn(n, n, |i, j| mat.read(i, j) + mat.read(j, i))
}

fn tridiagonalization<E: RealField>(criterion: &mut Criterion) {
    let rng = &mut StdRng::seed_from_u64(0);
    for n in [32, 64, 128, 256] {
        let mat = random_symmetric::<E>(rng, n);
        let mut trid = mat.clone();
        let mut coeffs = vec![E::zero(); n - 1];

        let mut mem = GlobalPodBuffer::new(tridiagonalize_in_place_req::<E>(n).unwrap());

        criterion.bench_function(
            &format!("tridiag-st-{}-{}", type_name::<E>(), n),
            |bencher| {
                bencher.iter(|| {
                    trid.as_mut().copy_from(mat.as_ref());
                    tridiagonalize_in_place(
                        trid.as_mut(),
                        &mut coeffs,
                        Parallelism::None,
                        PodStack::new(&mut mem),
                    );
                });
            },
        );
    }
}

fn tridiagonal_evd<E: RealField>(criterion: &mut Criterion) {
    let rng = &mut StdRng::seed_from_u64(1);
    for n in [32, 64, 128, 256, 512] {
        let diag = (0..n).map(|_| random::<E>(rng)).collect::<Vec<_>>();
        let offdiag = (0..n - 1).map(|_| random::<E>(rng)).collect::<Vec<_>>();
        let mut u = Mat::<E>::zeros(n, n);

        criterion.bench_function(
            &format!("tridiag-evd-{}-{}", type_name::<E>(), n),
            |bencher| {
                bencher.iter(|| {
                    let mut diag = diag.clone();
                    let mut offdiag = offdiag.clone();
                    compute_tridiag_evd(
                        &mut diag,
                        &mut offdiag,
                        Some(u.as_mut()),
                        E::faer_epsilon(),
                        E::faer_zero_threshold(),
                        default_max_iter::<E>(n),
                    )
                    .unwrap();
                });
            },
        );
    }
}

fn evd<E: RealField>(criterion: &mut Criterion) {
    let rng = &mut StdRng::seed_from_u64(2);
    for n in [4, 8, 16, 32, 64, 128, 256] {
        let mat = random_symmetric::<E>(rng, n);
        let mut s = vec![E::zero(); n];
        let mut u = Mat::<E>::zeros(n, n);

        for (name, parallelism) in [("st", Parallelism::None), ("mt", Parallelism::Rayon(0))] {
            let mut mem = GlobalPodBuffer::new(
                self_adjoint_evd_req::<E>(n, ComputeVectors::Yes, parallelism, Default::default())
                    .unwrap(),
            );

            criterion.bench_function(
                &format!("sym-evd-{}-{}-{}", name, type_name::<E>(), n),
                |bencher| {
                    bencher.iter(|| {
                        self_adjoint_evd(
                            mat.as_ref(),
                            &mut s,
                            Some(u.as_mut()),
                            parallelism,
                            PodStack::new(&mut mem),
                            Default::default(),
                        )
                        .unwrap();
                    });
                },
            );
        }
    }
}

fn gevd<E: RealField>(criterion: &mut Criterion) {
    let rng = &mut StdRng::seed_from_u64(3);
    for n in [8, 32, 128] {
        let a = random_symmetric::<E>(rng, n);
        let b = {
            let x = Mat::from_fn(n, n, |_, _| random::<E>(rng));
            let xtx = x.transpose() * &x;
            Mat::from_fn(n, n, |i, j| {
                xtx.read(i, j) + if i == j { E::one() } else { E::zero() }
            })
        };
        let mut s = vec![E::zero(); n];
        let mut u = Mat::<E>::zeros(n, n);

        let parallelism = Parallelism::None;
        let mut mem = GlobalPodBuffer::new(
            self_adjoint_gevd_req::<E>(n, ComputeVectors::Yes, parallelism, Default::default())
                .unwrap(),
        );

        criterion.bench_function(
            &format!("sym-gevd-{}-{}", type_name::<E>(), n),
            |bencher| {
                bencher.iter(|| {
                    self_adjoint_gevd(
                        a.as_ref(),
                        b.as_ref(),
                        &mut s,
                        Some(u.as_mut()),
                        parallelism,
                        PodStack::new(&mut mem),
                        Default::default(),
                    )
                    .unwrap();
                });
            },
        );
    }
}

criterion_group!(
    benches,
    tridiagonalization::<f32>,
    tridiagonalization::<f64>,
    tridiagonal_evd::<f32>,
    tridiagonal_evd::<f64>,
    evd::<f32>,
    evd::<f64>,
    gevd::<f64>,
);
criterion_main!(benches);
