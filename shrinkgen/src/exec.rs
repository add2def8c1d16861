//! Imperative-style generators built from [`Gen::pick`].

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::any::Any;
use crate::context::{self, GenerationHandler};
use crate::error::GenError;
use crate::generator::Gen;
use crate::rng::Random;
use crate::shrink::Shrinkable;
use crate::strategy::Strategy;

/// The picks made by one run of an `exec` body, enough to replay it.
///
/// Pick `i` always draws from the `i`-th split of `random`, whether it is
/// replayed from `ingredients` or generated fresh, so replaying a recipe is
/// deterministic.
#[derive(Clone)]
pub struct Recipe {
    random: Random,
    size: usize,
    ingredients: Vec<Shrinkable<Any>>,
    num_fixed: usize,
}

impl Recipe {
    pub fn new(random: Random, size: usize) -> Self {
        Self {
            random,
            size,
            ingredients: Vec::new(),
            num_fixed: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Recorded picks in the order they were made
    pub fn ingredients(&self) -> &[Shrinkable<Any>] {
        &self.ingredients
    }

    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    /// One `type: value` line per recorded pick
    pub fn describe_picks(&self) -> Vec<String> {
        self.ingredients
            .iter()
            .map(|ingredient| {
                let (type_name, value) = ingredient.value().describe();
                format!("{}: {}", type_name, value)
            })
            .collect()
    }
}

impl fmt::Debug for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recipe")
            .field("size", &self.size)
            .field("picks", &self.describe_picks())
            .field("num_fixed", &self.num_fixed)
            .finish()
    }
}

struct ExecHandler {
    random: Random,
    size: usize,
    fixed: Vec<Shrinkable<Any>>,
    picked: Vec<Shrinkable<Any>>,
}

impl ExecHandler {
    fn new(recipe: &Recipe) -> Self {
        Self {
            random: recipe.random.clone(),
            size: recipe.size,
            fixed: recipe.ingredients[..recipe.num_fixed].to_vec(),
            picked: Vec::new(),
        }
    }
}

impl GenerationHandler for ExecHandler {
    fn on_generate(&mut self, generator: &Gen<Any>) -> Result<Any, GenError> {
        let random = self.random.split();
        let index = self.picked.len();
        let ingredient = match self.fixed.get(index) {
            Some(fixed) => fixed.clone(),
            None => generator.generate_sized(&random, self.size)?,
        };
        trace!(index, pick = ?ingredient.value(), "recorded pick");
        let value = ingredient.value().clone();
        self.picked.push(ingredient);
        Ok(value)
    }
}

/// Run `body` once with the picks fixed by `recipe`
fn execute<T, F>(body: &F, recipe: &Recipe) -> Result<(T, Recipe), GenError>
where
    F: Fn() -> Result<T, GenError>,
{
    let handler = Rc::new(RefCell::new(ExecHandler::new(recipe)));
    let value = context::with_handler(Rc::clone(&handler), body)?;
    let picked = std::mem::take(&mut handler.borrow_mut().picked);
    let executed = Recipe {
        random: recipe.random.clone(),
        size: recipe.size,
        num_fixed: picked.len(),
        ingredients: picked,
    };
    Ok((value, executed))
}

fn recipe_tree<T, F>(body: F, value: T, executed: Recipe) -> Shrinkable<T>
where
    T: 'static,
    F: Fn() -> Result<T, GenError> + Clone + 'static,
{
    Shrinkable::new(value, move || {
        let body = body.clone();
        Box::new(
            shrink_recipe(&executed)
                .filter_map(move |candidate| run_recipe(&body, &candidate).ok()),
        )
    })
}

fn run_recipe<T, F>(body: &F, recipe: &Recipe) -> Result<Shrinkable<T>, GenError>
where
    T: 'static,
    F: Fn() -> Result<T, GenError> + Clone + 'static,
{
    let (value, executed) = execute(body, recipe)?;
    Ok(recipe_tree(body.clone(), value, executed))
}

/// Candidate recipes: each shrink of pick `i` with picks `0..i` kept and
/// everything after `i` regenerated
fn shrink_recipe(recipe: &Recipe) -> Box<dyn Iterator<Item = Recipe>> {
    let recipe = recipe.clone();
    Box::new((0..recipe.ingredients.len()).flat_map(move |index| {
        let base = recipe.clone();
        recipe.ingredients[index].shrinks().map(move |shrunk| {
            let mut ingredients = base.ingredients[..index].to_vec();
            ingredients.push(shrunk);
            Recipe {
                random: base.random.clone(),
                size: base.size,
                ingredients,
                num_fixed: index + 1,
            }
        })
    }))
}

/// Strategy running an `exec` body
#[derive(Clone)]
pub struct Exec<F> {
    body: F,
}

impl<T, F> Strategy<T> for Exec<F>
where
    T: 'static,
    F: Fn() -> Result<T, GenError> + Clone + Send + 'static,
{
    fn generate(&self, random: &Random, size: usize) -> Result<Shrinkable<T>, GenError> {
        run_recipe(&self.body, &Recipe::new(random.clone(), size))
    }
}

/// Build a generator from imperative code that picks values with [`Gen::pick`].
///
/// Every pick is recorded, and the resulting tree shrinks by shrinking the
/// picks one at a time and re-running `body`. Shrink candidates for which
/// `body` fails are skipped; a failure on the initial run is returned.
///
/// ```rust
/// use shrinkgen::{exec, in_range, Random};
///
/// let sums = exec(|| {
///     let a = in_range(0u32, 10).pick()?;
///     let b = in_range(0u32, 10).pick()?;
///     Ok(a + b)
/// });
/// let tree = sums.generate(&Random::new(7)).unwrap();
/// assert!(*tree.value() < 19);
/// ```
pub fn exec<T, F>(body: F) -> Gen<T>
where
    T: 'static,
    F: Fn() -> Result<T, GenError> + Clone + Send + 'static,
{
    Gen::new(Exec { body })
}

/// Like [`exec`], but runs `body` directly and also returns the recipe of
/// the root run, for inspecting what was picked
pub fn exec_with_recipe<T, F>(
    body: F,
    random: &Random,
    size: usize,
) -> Result<(Shrinkable<T>, Recipe), GenError>
where
    T: 'static,
    F: Fn() -> Result<T, GenError> + Clone + 'static,
{
    let (value, executed) = execute(&body, &Recipe::new(random.clone(), size))?;
    let tree = recipe_tree(body, value, executed.clone());
    Ok((tree, executed))
}
