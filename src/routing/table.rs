/*!

The weighted routing table, filled during the topology construction.

For each vnet the table has one `DestinationSet` per outgoing link, in the order the links were added. Each link also has a weight, shared by all the vnets. A lookup selects among the links reaching the destination those of minimum weight.
Correct weights are what avoids deadlock when routing by table; no cycle check is made here.

*/

use ::rand::{rngs::StdRng,Rng};
use quantifiable_derive::Quantifiable;//the derive macro

use crate::destination::DestinationSet;
use crate::error;
use crate::error::*;
use super::OutportSelection;

#[derive(Clone,Debug,Default,Quantifiable)]
pub struct WeightedRoutingTable
{
	///`routes[vnet][link]` are the destinations that can be reached through `link`.
	routes: Vec<Vec<DestinationSet>>,
	///`weights[link]`
	weights: Vec<i32>,
}

impl WeightedRoutingTable
{
	pub fn new() -> WeightedRoutingTable
	{
		WeightedRoutingTable::default()
	}
	///Append one link, giving its destinations for each vnet. The table grows to the widest entry seen.
	pub fn add_route(&mut self, entry:&[DestinationSet])
	{
		if entry.len() > self.routes.len()
		{
			self.routes.resize(entry.len(),vec![]);
		}
		for (vnet,destinations) in entry.iter().enumerate()
		{
			self.routes[vnet].push(destinations.clone());
		}
	}
	///Append the weight of the next link.
	pub fn add_weight(&mut self, weight:i32)
	{
		self.weights.push(weight);
	}
	pub fn num_vnets(&self) -> usize
	{
		self.routes.len()
	}
	pub fn weight(&self, link:usize) -> Option<i32>
	{
		self.weights.get(link).copied()
	}
	/**
	The links of `vnet` that reach some of `destination` and have the least weight among those, in table order.
	An empty vector means that there is no route.
	**/
	pub fn candidates(&self, vnet:usize, destination:&DestinationSet) -> Result<Vec<usize>,Error>
	{
		let links = match self.routes.get(vnet)
		{
			Some(links) => links,
			None => return Ok(vec![]),
		};
		let mut best_weight = None;
		let mut best = vec![];
		for (link,link_destinations) in links.iter().enumerate()
		{
			if !destination.intersection_is_not_empty(link_destinations)
			{
				continue;
			}
			let weight = self.weight(link).ok_or_else(||error!(undetermined).with_message(format!("link {} has routes but no weight",link)))?;
			match best_weight
			{
				Some(w) if weight>w => (),
				Some(w) if weight==w => best.push(link),
				_ =>
				{
					best_weight = Some(weight);
					best = vec![link];
				},
			}
		}
		Ok(best)
	}
	/**
	Select the link towards `destination` for `vnet`.
	For an ordered vnet always the first candidate, so that all the packets follow the same path. Otherwise a random candidate.
	The virtual channel is not selected here.
	**/
	pub fn lookup(&self, vnet:usize, destination:&DestinationSet, ordered:bool, rng:&mut StdRng) -> Result<OutportSelection,Error>
	{
		let candidates = self.candidates(vnet,destination)?;
		if candidates.is_empty()
		{
			return Err(error!(no_route,vnet).with_message(format!("No Route exists from this Router towards {:?}.",destination)));
		}
		let index = if ordered { 0 } else { rng.gen_range(0..candidates.len()) };
		Ok(OutportSelection::port(candidates[index]))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;

	fn set(list:&[usize]) -> DestinationSet
	{
		list.iter().copied().collect()
	}

	/// Links: 0 ->{0} w1, 1 ->{1,2} w2, 2 ->{2} w1, 3 ->{2,3} w1. With two vnets, the second only sees link 0 and 1.
	fn example_table() -> WeightedRoutingTable
	{
		let mut table = WeightedRoutingTable::new();
		table.add_route(&[set(&[0]),set(&[0])]);
		table.add_weight(1);
		table.add_route(&[set(&[1,2]),set(&[1,2])]);
		table.add_weight(2);
		table.add_route(&[set(&[2])]);
		table.add_weight(1);
		table.add_route(&[set(&[2,3])]);
		table.add_weight(1);
		table
	}

	#[test]
	fn minimum_weight_candidates()
	{
		let table = example_table();
		assert_eq!(table.num_vnets(),2);
		assert_eq!(table.candidates(0,&set(&[2])).expect("lookup"),vec![2,3]);
		assert_eq!(table.candidates(0,&set(&[1])).expect("lookup"),vec![1]);
		//The narrower vnet has no entries for links 2 and 3.
		assert_eq!(table.candidates(1,&set(&[2])).expect("lookup"),vec![1]);
		assert!(table.candidates(5,&set(&[2])).expect("lookup").is_empty());
	}

	#[test]
	fn ordered_is_deterministic()
	{
		let table = example_table();
		let mut rng=StdRng::seed_from_u64(10u64);
		for _ in 0..100
		{
			let selection = table.lookup(0,&set(&[2]),true,&mut rng).expect("there is a route");
			assert_eq!(selection.port,2);
			assert_eq!(selection.virtual_channel,None);
		}
	}

	#[test]
	fn unordered_is_balanced()
	{
		let table = example_table();
		let mut rng=StdRng::seed_from_u64(10u64);
		let trials = 10000;
		let mut counts = [0f64;4];
		for _ in 0..trials
		{
			let selection = table.lookup(0,&set(&[2]),false,&mut rng).expect("there is a route");
			assert!(selection.port==2 || selection.port==3,"link {} has not the minimum weight",selection.port);
			counts[selection.port]+=1.0;
		}
		//Chi-square with one degree of freedom; 10.83 is the 0.001 critical value.
		let expected = trials as f64/2.0;
		let chi2 = (counts[2]-expected).powi(2)/expected + (counts[3]-expected).powi(2)/expected;
		assert!(chi2<10.83,"skewed selection {:?} chi2={}",counts,chi2);
	}

	#[test]
	fn no_route_is_an_error()
	{
		let table = example_table();
		let mut rng=StdRng::seed_from_u64(10u64);
		match table.lookup(0,&set(&[9]),true,&mut rng)
		{
			Err(Error{kind:ErrorKind::NoRoute{vnet:0},..}) => (),
			x => panic!("expected NoRoute, got {:?}",x),
		}
		match table.lookup(3,&set(&[0]),false,&mut rng)
		{
			Err(Error{kind:ErrorKind::NoRoute{vnet:3},..}) => (),
			x => panic!("expected NoRoute, got {:?}",x),
		}
	}
}
