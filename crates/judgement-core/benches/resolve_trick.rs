use criterion::{Criterion, black_box, criterion_group, criterion_main};
use judgement_core::model::deck::Deck;
use judgement_core::model::player::PlayerId;
use judgement_core::model::suit::Suit;
use judgement_core::model::trick::{Play, resolve_trick};

fn bench_resolve(c: &mut Criterion) {
    let deck = Deck::shuffled_with_seed(99);
    let tricks: Vec<Vec<Play>> = deck
        .cards()
        .chunks(4)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .map(|(i, card)| Play::new(PlayerId(i), *card))
                .collect()
        })
        .collect();

    c.bench_function("resolve_trick_13x4", |b| {
        b.iter(|| {
            for (index, trick) in tricks.iter().enumerate() {
                black_box(resolve_trick(black_box(trick), Suit::ALL[index % 4]));
            }
        })
    });
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
