use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rsharp_options::ParseOptions;
use rsharp_parser::parse_compilation_unit;

// A medium-size C# source (~100 lines) with various constructs
const CSHARP_SOURCE: &str = r#"
using System;
using System.Collections.Generic;
using static System.Math;

namespace Inventory.Services
{
    public interface IRepository<T> where T : class
    {
        T Find(int id);
        IEnumerable<T> All { get; }
        void Save(T item);
    }

    public enum Status { Active = 1, Archived, Deleted }

    public delegate void ItemChanged<in T>(T item, Status status);

    public sealed class Item
    {
        public int Id { get; init; }
        public string Name { get; set; } = "";
        public decimal Price { get; private set; }
        public Status Status { get; set; } = Status.Active;

        public Item(int id, string name, decimal price)
        {
            Id = id;
            Name = name;
            Price = price;
        }

        public override string ToString() => $"{Name} ({Id}): {Price,10:C}";
    }

    public class ItemService : IRepository<Item>
    {
        private readonly Dictionary<int, Item> items = new Dictionary<int, Item>();
        private int nextId = 1;

        public event ItemChanged<Item> Changed;

        public IEnumerable<Item> All => items.Values;

        public Item this[int id]
        {
            get { return Find(id); }
        }

        public Item Find(int id)
        {
            Item item = null;
            return items.TryGetValue(id, out item) ? item : null;
        }

        public void Save(Item item)
        {
            if (item == null)
                throw new ArgumentNullException(nameof(item));
            items[item.Id] = item;
            Changed?.Invoke(item, item.Status);
        }

        public Item Create(string name, decimal price)
        {
            var item = new Item(nextId++, name, price) { Status = Status.Active };
            Save(item);
            return item;
        }

        public decimal Total()
        {
            decimal total = 0;
            foreach (var item in items.Values)
            {
                if (item.Status != Status.Active) continue;
                total += item.Price;
            }
            return Round(total, 2);
        }

        public IEnumerable<Item> Cheaper(decimal limit)
        {
            for (int i = 1; i < nextId; i++)
            {
                var item = Find(i);
                if (item != null && item.Price < limit)
                    yield return item;
            }
        }

        public int Archive(Func<Item, bool> predicate)
        {
            int count = 0;
            try
            {
                foreach (var item in items.Values)
                {
                    if (!predicate(item)) continue;
                    item.Status = Status.Archived;
                    count++;
                }
            }
            catch (InvalidOperationException e) when (e.Message != null)
            {
                count = -1;
            }
            finally
            {
                Changed = null;
            }
            return count;
        }

        public static ItemService operator +(ItemService a, Item b)
        {
            a.Save(b);
            return a;
        }
    }
}
"#;

fn bench_parse_csharp(c: &mut Criterion) {
    let options = ParseOptions::default();
    c.bench_function("parse_csharp_medium", |b| {
        b.iter(|| {
            let tree = parse_compilation_unit(black_box(CSHARP_SOURCE), &options);
            black_box(tree);
        });
    });
}

fn bench_parse_csharp_broken(c: &mut Criterion) {
    // Every third closing brace removed, to exercise recovery.
    let mut closing = 0;
    let broken: String = CSHARP_SOURCE
        .chars()
        .filter(|&ch| {
            if ch == '}' {
                closing += 1;
                return closing % 3 != 0;
            }
            true
        })
        .collect();
    let options = ParseOptions::default();
    c.bench_function("parse_csharp_broken", |b| {
        b.iter(|| {
            let tree = parse_compilation_unit(black_box(&broken), &options);
            black_box(tree);
        });
    });
}

criterion_group!(benches, bench_parse_csharp, bench_parse_csharp_broken);
criterion_main!(benches);
