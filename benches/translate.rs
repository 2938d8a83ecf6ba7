use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sendgrid_transport::{
    message::header::HeaderName,
    sendgrid::{Mail, MessageTranslator},
    Message,
};

fn message(recipients: usize) -> Message {
    let mut builder = Message::builder()
        .from_named("john@doe.com", "John Doe")
        .subject("The Message")
        .header(HeaderName::new_from_ascii_static("X-Campaign"), "spring");
    for i in 0..recipients {
        builder = builder.bcc(format!("user{i}@doe.com"));
    }
    builder.to("jane@doe.com").body("Something really important")
}

fn criterion_benchmark(c: &mut Criterion) {
    let translator = MessageTranslator::new();

    let single = message(0);
    c.bench_function("translate single recipient", |b| {
        b.iter(|| translator.translate(black_box(&single)).unwrap())
    });

    let many = message(100);
    c.bench_function("translate 100 bcc recipients", |b| {
        b.iter(|| translator.translate(black_box(&many)).unwrap())
    });

    let mail = translator.translate(&many).unwrap();
    c.bench_function("serialize 100 bcc recipients", |b| {
        b.iter(|| serde_json::to_vec(black_box::<&Mail>(&mail)).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
